/// Snapshot of the clock published on the status topic.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct ClockStatus {
    /// The `HH:MM:SS.mmm` text currently on the discs.
    pub display: String,

    /// Stopwatch seconds accumulated so far.
    pub count: f64,

    pub counting: bool,
    pub brightness: u8,
    pub on: bool,

    /// Secondary clocks, formatted in their zones.
    pub zones: Vec<ZoneTime>,
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct ZoneTime {
    pub label: String,
    pub time: String,
}

impl ClockStatus {
    /// State before the first render tick.
    pub fn startup(brightness: u8) -> Self {
        Self {
            display: String::new(),
            count: 0.0,
            counting: false,
            brightness,
            on: true,
            zones: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_json_shape() {
        let status = ClockStatus {
            display: String::from("09:05:07.123"),
            count: 1.25,
            counting: true,
            brightness: 80,
            on: true,
            zones: vec![ZoneTime {
                label: String::from("Tokyo Time"),
                time: String::from("18:05:07"),
            }],
        };

        insta::assert_json_snapshot!(status, @r#"
        {
          "display": "09:05:07.123",
          "count": 1.25,
          "counting": true,
          "brightness": 80,
          "on": true,
          "zones": [
            {
              "label": "Tokyo Time",
              "time": "18:05:07"
            }
          ]
        }
        "#);
    }
}
