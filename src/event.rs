#[derive(Debug, serde::Deserialize)]
#[cfg_attr(test, derive(serde::Serialize))]
pub struct Event {
    pub event: EventInner,
}

#[derive(Debug, serde::Deserialize)]
#[cfg_attr(test, derive(serde::Serialize))]
pub enum EventInner {
    TurnOn,
    TurnOff,

    SetBrightness(u8),

    /// Let the stopwatch accumulate once per render tick.
    StartCountUp,
    StopCountUp,
    ResetCountUp,

    /// Restart the process as if a new deployment had been observed.
    Reload,
}

#[cfg(test)]
mod tests {
    use crate::event::Event;
    use crate::event::EventInner;

    #[test]
    fn test_turn_on() {
        let e = Event {
            event: EventInner::TurnOn,
        };
        insta::assert_json_snapshot!(e, @r#"
        {
          "event": "TurnOn"
        }
        "#);
    }

    #[test]
    fn test_turn_off() {
        let e = Event {
            event: EventInner::TurnOff,
        };
        insta::assert_json_snapshot!(e, @r#"
        {
          "event": "TurnOff"
        }
        "#);
    }

    #[test]
    fn test_set_brightness() {
        let e = Event {
            event: EventInner::SetBrightness(20),
        };
        insta::assert_json_snapshot!(e, @r#"
        {
          "event": {
            "SetBrightness": 20
          }
        }
        "#);
    }

    #[test]
    fn test_start_count_up() {
        let e = Event {
            event: EventInner::StartCountUp,
        };
        insta::assert_json_snapshot!(e, @r#"
        {
          "event": "StartCountUp"
        }
        "#);
    }

    #[test]
    fn test_reload() {
        let e = Event {
            event: EventInner::Reload,
        };
        insta::assert_json_snapshot!(e, @r#"
        {
          "event": "Reload"
        }
        "#);
    }

    #[test]
    fn test_deser_testfile_set_brightness_20() {
        let s = include_str!("../test/set_brightness_20.json");
        let _: Event = serde_json::from_str(s).unwrap();
    }

    #[test]
    fn test_deser_testfile_turn_off() {
        let s = include_str!("../test/turn_off.json");
        let _: Event = serde_json::from_str(s).unwrap();
    }

    #[test]
    fn test_deser_testfile_turn_on() {
        let s = include_str!("../test/turn_on.json");
        let _: Event = serde_json::from_str(s).unwrap();
    }

    #[test]
    fn test_deser_testfile_start_count_up() {
        let s = include_str!("../test/start_count_up.json");
        let _: Event = serde_json::from_str(s).unwrap();
    }

    #[test]
    fn test_deser_testfile_reset_count_up() {
        let s = include_str!("../test/reset_count_up.json");
        let _: Event = serde_json::from_str(s).unwrap();
    }

    #[test]
    fn test_deser_testfile_reload() {
        let s = include_str!("../test/reload.json");
        let _: Event = serde_json::from_str(s).unwrap();
    }
}
