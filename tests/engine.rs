mod tests {
    use treelight_engine::color::hue_to_rgb;
    use treelight_engine::{AnimationEngine, AnimationPhase, Rgb};

    const STRIP_LEN: usize = 24;
    const BLACK: Rgb = Rgb { r: 0, g: 0, b: 0 };
    const RED: Rgb = Rgb { r: 255, g: 0, b: 0 };
    const WHITE: Rgb = Rgb {
        r: 255,
        g: 255,
        b: 255,
    };

    fn engine_with(raw: &str) -> AnimationEngine {
        let mut engine = AnimationEngine::new(STRIP_LEN as u16);
        assert_eq!(engine.apply_mode(raw), Ok(true));
        engine
    }

    #[test]
    fn test_renders_white_before_first_mode() {
        let engine = AnimationEngine::new(STRIP_LEN as u16);
        assert_eq!(engine.mode_id(), None);

        let mut frame = [BLACK; STRIP_LEN];
        engine.render(&mut frame);
        assert_eq!(frame, [WHITE; STRIP_LEN]);
    }

    #[test]
    fn test_single_color_palette_fills_strip() {
        // one red triple, full-strip segment, no gradient
        let engine = engine_with("001000ff0000");

        let mut frame = [BLACK; STRIP_LEN];
        engine.render(&mut frame);
        assert_eq!(frame, [RED; STRIP_LEN]);
    }

    #[test]
    fn test_gradient_accumulates_across_frames() {
        let engine = engine_with("001001ff0000");

        let mut frame = [BLACK; STRIP_LEN];
        engine.render(&mut frame);
        // first frame moves 60% of the way toward the target
        assert_eq!(frame[0].r, 153);
        assert_eq!(frame[0].g, 0);

        engine.render(&mut frame);
        // 153 + round(0.6 * (255 - 153))
        assert_eq!(frame[0].r, 214);
    }

    #[test]
    fn test_gradient_from_scratch_buffer_differs() {
        let engine = engine_with("001001ff0000");

        let mut persistent = [BLACK; STRIP_LEN];
        engine.render(&mut persistent);
        engine.render(&mut persistent);

        let mut scratch = [BLACK; STRIP_LEN];
        engine.render(&mut scratch);

        // the carried-forward buffer is part of the animation state
        assert!(persistent[0].r > scratch[0].r);
    }

    #[test]
    fn test_tiny_segment_has_no_blend_window() {
        // segment size 1 makes the blend window zero; ratio falls back to 1.0
        let engine = engine_with("001010ff0000");

        let mut frame = [BLACK; 4];
        engine.render(&mut frame);
        assert_eq!(frame[0], RED);
    }

    #[test]
    fn test_rainbow_renders_hue_walk() {
        let engine = engine_with("101010-");
        let config = engine.config().expect("missing config");
        assert!(config.rainbow);

        let mut frame = [BLACK; 4];
        engine.render(&mut frame);
        // step 0, segment 1: every pixel sits in hue bucket (0 + i) / 360
        assert_eq!(frame[0], hue_to_rgb(0));
        assert!(frame[0].r > frame[0].g && frame[0].r > frame[0].b);
    }

    #[test]
    fn test_advance_respects_speed_divisor() {
        // speed divisor 3, segment 1
        let mut engine = engine_with("303010ff0000");

        for expected_step in [0, 0, 1, 1, 1, 2, 2, 2, 3] {
            engine.advance();
            assert_eq!(engine.phase().step, expected_step);
        }
    }

    #[test]
    fn test_step_is_cyclic() {
        // rainbow, segment 1: cycle length 360
        let mut engine = engine_with("101010-");

        for _ in 0..360 {
            engine.advance();
            assert!(engine.phase().step < 360);
        }
        assert_eq!(engine.phase(), AnimationPhase::default());
    }

    #[test]
    fn test_gradient_advances_by_whole_segments() {
        // gradient on, segment 2: cycle length 24 * 2
        let mut engine = engine_with("001021ff0000");

        engine.advance();
        assert_eq!(engine.phase().step, 2);

        for _ in 0..23 {
            engine.advance();
        }
        assert_eq!(engine.phase().step, 0);
    }

    #[test]
    fn test_new_mode_resets_phase() {
        let mut engine = engine_with("303010ff0000");
        for _ in 0..6 {
            engine.advance();
        }
        assert_ne!(engine.phase(), AnimationPhase::default());

        assert_eq!(engine.apply_mode("403010ff0000"), Ok(true));
        assert_eq!(engine.mode_id(), Some(4));
        assert_eq!(engine.phase(), AnimationPhase::default());
    }

    #[test]
    fn test_redelivered_mode_is_a_no_op() {
        let mut engine = engine_with("303010ff0000");
        for _ in 0..6 {
            engine.advance();
        }
        let phase = engine.phase();

        // same mode id: nothing is parsed, nothing is mutated
        assert_eq!(engine.apply_mode("399990zzzz"), Ok(false));
        assert_eq!(engine.phase(), phase);
        assert_eq!(engine.config().map(|c| c.speed_divisor), Some(3));
    }

    #[test]
    fn test_rejected_mode_keeps_previous_config() {
        let mut engine = engine_with("303010ff0000");

        assert!(engine.apply_mode("4x").is_err());
        assert_eq!(engine.mode_id(), Some(3));

        assert!(engine.apply_mode("4y5000").is_err());
        assert_eq!(engine.mode_id(), Some(3));
    }

    #[test]
    fn test_advance_without_config_is_inert() {
        let mut engine = AnimationEngine::new(STRIP_LEN as u16);
        engine.advance();
        assert_eq!(engine.phase(), AnimationPhase::default());
    }
}
