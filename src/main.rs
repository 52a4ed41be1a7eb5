use embedded_graphics::prelude::DrawTarget;
use smart_leds_matrix::layout::Rectangular;
use smart_leds_matrix::SmartLedMatrix;
use time::OffsetDateTime;
use time::UtcOffset;

mod bitmap;
mod cli;
mod clock_task;
mod color;
mod config;
mod error;
mod event;
mod glyph;
mod grid;
mod konst;
mod logging;
mod mqtt;
mod patterns;
mod status;
mod systemd;
mod version;
mod writer;
mod zones;

fn main() -> color_eyre::eyre::Result<()> {
    setup_panic();

    // Must happen while the process is still single-threaded; the lookup
    // fails once tokio's blocking threads exist.
    let time_offset = UtcOffset::current_local_offset();

    async_main(time_offset)
}

#[tokio::main(flavor = "current_thread")]
async fn async_main(
    time_offset: Result<UtcOffset, time::error::IndeterminateOffset>,
) -> color_eyre::eyre::Result<()> {
    color_eyre::install().map_err(crate::error::Error::InstallingColorEyre)?;
    let cli = <crate::cli::Cli as clap::Parser>::parse();
    crate::logging::setup(cli.verbosity);
    let cfg = crate::config::Config::load(&cli.config).await?;

    match cli.command {
        cli::Command::Run => {
            let process_state = systemd::ProcessState {
                span: tracing::info_span!("systemd"),
            };
            process_state.set_starting();

            if let Err(error) = run(cfg, time_offset, &process_state).await {
                process_state.set_failed();
                return Err(error.into());
            }
        }
        cli::Command::VerifyConfig => {
            tracing::info!("Configuration verified");
        }
        cli::Command::Preview { at } => {
            preview(cfg, time_offset, at)?;
        }
    }

    Ok(())
}

fn setup_panic() {
    human_panic::setup_panic!(human_panic::Metadata::new(
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION")
    ));
}

async fn run(
    config: crate::config::Config,
    time_offset: Result<UtcOffset, time::error::IndeterminateOffset>,
    process_state: &systemd::ProcessState,
) -> Result<(), crate::error::Error> {
    let time_offset = time_offset.map_err(crate::error::Error::TimeOffset)?;

    let ddp_connection = ddp_rs::connection::DDPConnection::try_new(
        format!("{}:{}", config.display.host, config.display.port),
        ddp_rs::protocol::PixelConfig::default(), // Default is RGB, 8 bits per channel
        ddp_rs::protocol::ID::Default,
        std::net::UdpSocket::bind(format!("0.0.0.0:{}", config.display.udp_port))
            .map_err(crate::error::Error::UDPBind)?,
    )?;

    let writer = writer::Writer::new(ddp_connection);
    let mut matrix = SmartLedMatrix::<_, _, { konst::NUM_CELLS }>::new(
        writer,
        Rectangular::new(konst::GRID_COLS as _, konst::GRID_ROWS as _),
    );
    matrix.set_brightness(config.display.initial_brightness.clamp(0, 100));
    matrix
        .clear(embedded_graphics::pixelcolor::Rgb888::default())
        .unwrap();
    matrix.flush()?;

    let running = std::sync::Arc::new(std::sync::atomic::AtomicBool::new(true));
    let cancellation_token = tokio_util::sync::CancellationToken::new();
    let (event_sender, event_receiver) = tokio::sync::mpsc::channel::<event::Event>(100);
    let (reload_sender, mut reload_receiver) = tokio::sync::mpsc::channel::<()>(1);
    let (status_sender, status_receiver) = tokio::sync::watch::channel(
        status::ClockStatus::startup(config.display.initial_brightness),
    );

    let mqtt_handle = tokio::task::spawn({
        let mqtt_config = config.mqtt.clone();
        let cancellation_token = cancellation_token.clone();
        mqtt::run(mqtt_config, cancellation_token, event_sender, status_receiver)
    });

    let version_checker = version::VersionChecker::new(
        &config.update,
        cancellation_token.clone(),
        reload_sender.clone(),
    )?;
    let version_handle = tokio::task::spawn(version_checker.run());

    let clock_task = clock_task::ClockTask::new(
        running,
        cancellation_token.clone(),
        matrix,
        time_offset,
        status_sender,
        reload_sender,
        &config,
    );
    let mut clock_handle = tokio::task::spawn(clock_task.run(event_receiver));

    process_state.set_running();

    let mut clock_done = false;
    let reload = tokio::select! {
        result = &mut clock_handle => {
            clock_done = true;
            result??;
            tracing::error!("Render loop ended unexpectedly");
            false
        }

        requested = reload_receiver.recv() => {
            if requested.is_some() {
                tracing::info!("Reload requested, shutting down for re-exec");
            }
            requested.is_some()
        }

        _ctrl_c = tokio::signal::ctrl_c() => {
            tracing::info!("Ctrl-C received, shutting down");
            false
        }
    };

    cancellation_token.cancel();

    if !clock_done {
        clock_handle.await??;
    }

    match version_handle.await {
        Ok(Ok(())) => {}
        Ok(Err(error)) => tracing::error!(?error, "Version check task failed"),
        Err(error) => tracing::error!(?error, "Version check task did not shut down cleanly"),
    }
    match mqtt_handle.await {
        Ok(Ok(())) => {}
        Ok(Err(error)) => tracing::error!(?error, "MQTT task failed"),
        Err(error) => tracing::error!(?error, "MQTT task did not shut down cleanly"),
    }

    if reload {
        process_state.set_reloading();
        return Err(reexec());
    }

    process_state.set_finished();
    Ok(())
}

/// Replaces this process with a fresh copy of its own binary, keeping
/// arguments and environment. Only returns on failure.
fn reexec() -> crate::error::Error {
    use std::os::unix::process::CommandExt;

    let exe = match std::env::current_exe() {
        Ok(exe) => exe,
        Err(error) => return crate::error::Error::Reexec(error),
    };

    tracing::info!(?exe, "Replacing process image");
    let error = std::process::Command::new(exe)
        .args(std::env::args_os().skip(1))
        .exec();

    crate::error::Error::Reexec(error)
}

fn preview(
    config: crate::config::Config,
    time_offset: Result<UtcOffset, time::error::IndeterminateOffset>,
    at: Option<String>,
) -> Result<(), crate::error::Error> {
    let time_offset = time_offset.unwrap_or(UtcOffset::UTC);

    let now = match at {
        Some(at) => {
            let format = time::macros::format_description!(
                "[hour]:[minute]:[second].[subsecond digits:3]"
            );
            let time_of_day =
                time::Time::parse(&at, format).map_err(crate::error::Error::TimeParsing)?;
            OffsetDateTime::now_utc()
                .to_offset(time_offset)
                .replace_time(time_of_day)
        }
        None => OffsetDateTime::now_utc().to_offset(time_offset),
    };

    let frame = grid::GridBuilder::new().build(now)?;

    println!("{}", frame.grid);
    println!();
    for zone in &config.zones {
        println!("{:<16} {}", zone.label, zones::format_in_zone(zone, now));
    }

    Ok(())
}
