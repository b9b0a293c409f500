use web_sys as web;

/// One-shot chime for the easter egg: a sine root plus a fifth, with a fast
/// attack and a short release so repeated eggs never overlap audibly.
pub fn play_egg_chime(audio_ctx: &web::AudioContext) {
    let t0 = audio_ctx.current_time() + 0.01;
    for (freq, peak) in [(523.25_f32, 0.22_f32), (784.0, 0.12)] {
        let src = match web::OscillatorNode::new(audio_ctx) {
            Ok(s) => s,
            Err(e) => {
                log::error!("OscillatorNode error: {:?}", e);
                return;
            }
        };
        src.set_type(web::OscillatorType::Sine);
        src.frequency().set_value(freq);

        let gain = match web::GainNode::new(audio_ctx) {
            Ok(g) => g,
            Err(e) => {
                log::error!("GainNode error: {:?}", e);
                return;
            }
        };
        gain.gain().set_value(0.0);
        let _ = gain.gain().linear_ramp_to_value_at_time(peak, t0 + 0.03);
        let _ = gain.gain().linear_ramp_to_value_at_time(0.0, t0 + 0.45);

        let _ = src.connect_with_audio_node(&gain);
        let _ = gain.connect_with_audio_node(&audio_ctx.destination());
        let _ = src.start_with_when(t0);
        let _ = src.stop_with_when(t0 + 0.5);
    }
}
