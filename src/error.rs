#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Setting up error reporting failed")]
    InstallingColorEyre(#[source] color_eyre::Report),

    #[error(transparent)]
    Config(#[from] crate::config::ConfigError),

    #[error("DDP error")]
    Ddp(#[from] ddp_rs::error::DDPError),

    #[error(transparent)]
    Grid(#[from] crate::grid::GridError),

    #[error("Error getting local time offset")]
    TimeOffset(#[source] time::error::IndeterminateOffset),

    #[error("Error parsing time of day")]
    TimeParsing(#[source] time::error::Parse),

    #[error("Failed to bind UDP socket")]
    UDPBind(#[source] std::io::Error),

    #[error("Reqwest error")]
    Reqwest(#[source] reqwest::Error),

    #[error("Failed to replace the process image")]
    Reexec(#[source] std::io::Error),

    #[error("Task failed")]
    Join(#[from] tokio::task::JoinError),
}

#[derive(Debug, thiserror::Error)]
pub enum MqttError {
    #[error("Failed to subscribe")]
    Subscribing(#[source] rumqttc::v5::ClientError),

    #[error("Failed to publish")]
    Publishing(#[source] rumqttc::v5::ClientError),

    #[error("Connection failed")]
    Connection(#[source] rumqttc::v5::ConnectionError),
}
