use locomotion::{InputFrame, collision::Vec2};

/// One scripted input segment, held from `from_tick` until the next segment starts.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Segment {
    pub from_tick: u32,
    pub move_axis: Vec2,
    /// Press jump on the first tick of the segment.
    pub jump: bool,
    pub label: &'static str,
}

/// Input timeline played by the sandbox, sorted by start tick.
#[derive(Clone, Debug, Default)]
pub struct Timeline {
    segments: Vec<Segment>,
}

impl Timeline {
    pub fn new(mut segments: Vec<Segment>) -> Self {
        segments.sort_by_key(|s| s.from_tick);
        Self { segments }
    }

    /// Settle, walk forward, jump, climb the ramp, brake, run into the wall, idle.
    ///
    /// Times are in seconds and converted with the tick rate `hz`.
    pub fn demo(hz: f32) -> Self {
        let at = |seconds: f32| (seconds * hz).round() as u32;
        let segment = |seconds: f32, x: f32, y: f32, jump: bool, label| Segment {
            from_tick: at(seconds),
            move_axis: Vec2::new(x, y),
            jump,
            label,
        };

        Self::new(vec![
            segment(0.0, 0.0, 0.0, false, "settle"),
            segment(1.0, 0.0, 1.0, false, "walk forward"),
            segment(2.0, 0.0, 1.0, true, "jump"),
            segment(3.5, 1.0, 0.0, false, "climb ramp"),
            segment(5.5, -1.0, 0.0, false, "brake and turn back"),
            segment(8.0, -1.0, 0.0, false, "push into wall"),
            segment(10.0, 0.0, 0.0, false, "idle"),
        ])
    }

    fn segment_at(&self, tick: u32) -> Option<&Segment> {
        self.segments.iter().rev().find(|s| s.from_tick <= tick)
    }

    pub fn frame_at(&self, tick: u32) -> InputFrame {
        match self.segment_at(tick) {
            Some(s) => InputFrame {
                move_axis: s.move_axis,
                jump: s.jump && s.from_tick == tick,
            },
            None => InputFrame::default(),
        }
    }

    /// Label of the segment that starts exactly at `tick`.
    pub fn label_starting_at(&self, tick: u32) -> Option<&'static str> {
        self.segment_at(tick)
            .filter(|s| s.from_tick == tick)
            .map(|s| s.label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frames_hold_until_next_segment() {
        let timeline = Timeline::demo(50.0);
        assert_eq!(timeline.frame_at(0), InputFrame::default());
        assert_eq!(timeline.frame_at(49).move_axis, Vec2::zeros());
        assert_eq!(timeline.frame_at(50).move_axis, Vec2::new(0.0, 1.0));
        assert_eq!(timeline.frame_at(10_000).move_axis, Vec2::zeros());
    }

    #[test]
    fn jump_is_pressed_for_one_tick() {
        let timeline = Timeline::demo(50.0);
        assert!(timeline.frame_at(100).jump);
        assert!(!timeline.frame_at(101).jump);
        assert_eq!(timeline.label_starting_at(100), Some("jump"));
        assert_eq!(timeline.label_starting_at(101), None);
    }

    #[test]
    fn unsorted_segments_are_ordered() {
        let timeline = Timeline::new(vec![
            Segment {
                from_tick: 10,
                move_axis: Vec2::x(),
                jump: false,
                label: "late",
            },
            Segment {
                from_tick: 0,
                move_axis: Vec2::y(),
                jump: false,
                label: "early",
            },
        ]);
        assert_eq!(timeline.frame_at(5).move_axis, Vec2::y());
        assert_eq!(timeline.frame_at(15).move_axis, Vec2::x());
    }
}
