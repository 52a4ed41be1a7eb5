#[derive(Debug, serde::Deserialize)]
pub struct Config {
    pub display: DisplayConfig,
    pub update: UpdateConfig,
    pub mqtt: MqttConfig,

    /// Secondary text clocks. Defaults to UTC, the US west coast and Tokyo.
    #[serde(default = "crate::zones::default_zones")]
    pub zones: Vec<crate::zones::ZoneClock>,
}

#[derive(Debug, serde::Deserialize)]
pub struct DisplayConfig {
    pub host: std::net::IpAddr,
    pub port: u16,
    pub udp_port: u16,
    pub initial_brightness: u8,

    /// How often the grid is re-rendered. 50ms keeps the millisecond cells
    /// flipping smoothly.
    #[serde(with = "humantime_serde")]
    pub tick_interval: std::time::Duration,

    pub color: ColorConfig,
}

/// Color the on discs are driven with.
#[derive(Debug, Clone, Copy, serde::Deserialize)]
pub enum ColorConfig {
    White,
    Rainbow,
    Fixed { r: u8, g: u8, b: u8 },
}

#[derive(Debug, Clone, serde::Deserialize)]
pub struct UpdateConfig {
    /// Where the deployment manifest is served.
    pub manifest_url: url::Url,

    #[serde(with = "humantime_serde")]
    pub check_interval: std::time::Duration,
}

#[derive(Debug, Clone, serde::Deserialize)]
pub struct MqttConfig {
    pub host: std::net::IpAddr,
    pub port: u16,
    pub qos: Qos,
    pub client_name: String,

    #[serde(with = "humantime_serde")]
    pub keep_alive: std::time::Duration,

    pub topic_prefix: String,
}

#[derive(Debug, Clone, Copy, serde::Deserialize)]
#[expect(clippy::enum_variant_names, reason = "That's the names")]
pub enum Qos {
    AtMostOnce,
    AtLeastOnce,
    ExactlyOnce,
}

impl From<Qos> for rumqttc::v5::mqttbytes::QoS {
    fn from(value: Qos) -> Self {
        match value {
            Qos::AtMostOnce => rumqttc::v5::mqttbytes::QoS::AtMostOnce,
            Qos::AtLeastOnce => rumqttc::v5::mqttbytes::QoS::AtLeastOnce,
            Qos::ExactlyOnce => rumqttc::v5::mqttbytes::QoS::ExactlyOnce,
        }
    }
}

impl Config {
    pub async fn load(path: &camino::Utf8Path) -> Result<Self, ConfigError> {
        let config_str =
            tokio::fs::read_to_string(path)
                .await
                .map_err(|source| ConfigError::ReadingFile {
                    path: path.to_path_buf(),
                    source,
                })?;

        toml::from_str(&config_str).map_err(ConfigError::ParsingConfig)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read configuration file from path '{}'", .path)]
    ReadingFile {
        path: camino::Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    ParsingConfig(#[from] toml::de::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_example_config_parses() {
        let config: Config = toml::from_str(include_str!("../config.toml")).unwrap();

        assert_eq!(config.display.tick_interval.as_millis(), 50);
        assert_eq!(config.update.check_interval.as_secs(), 5);
        assert_eq!(config.zones.len(), 3);
    }

    #[test]
    fn test_zones_default_when_absent() {
        let config: Config = toml::from_str(
            r#"
            [display]
            host = "127.0.0.1"
            port = 4048
            udp_port = 4049
            initial_brightness = 80
            tick_interval = "50ms"
            color = "White"

            [update]
            manifest_url = "http://127.0.0.1:8000/version.json"
            check_interval = "5s"

            [mqtt]
            host = "127.0.0.1"
            port = 1883
            qos = "AtMostOnce"
            client_name = "flipdisc-clock"
            keep_alive = "5s"
            topic_prefix = "flipdisc"
            "#,
        )
        .unwrap();

        assert_eq!(config.zones, crate::zones::default_zones());
    }

    #[test]
    fn test_fixed_color_variant() {
        #[derive(Debug, serde::Deserialize)]
        struct Wrap {
            color: ColorConfig,
        }

        let wrap: Wrap = toml::from_str("color = { Fixed = { r = 255, g = 200, b = 0 } }").unwrap();

        match wrap.color {
            ColorConfig::Fixed { r, g, b } => {
                assert_eq!((r, g, b), (255, 200, 0));
            }
            other => panic!("unexpected variant: {other:?}"),
        }
    }
}
