#[derive(Debug)]
pub struct ProcessState {
    pub span: tracing::Span,
}

impl ProcessState {
    pub fn set_starting(&self) {
        self.notify_state("starting", &[NotifyState::Status("starting")]);
    }

    pub fn set_running(&self) {
        self.notify_state("ready", &[NotifyState::Ready]);
    }

    /// Announced right before the process replaces itself with the freshly
    /// deployed binary. The new image sends `READY=1` again once it is up.
    pub fn set_reloading(&self) {
        self.notify_state("reloading", &[NotifyState::Status("reloading")]);
    }

    pub fn set_failed(&self) {
        self.notify_state(
            "failed,stopping",
            &[NotifyState::Status("failed"), NotifyState::Stopping],
        );
    }

    pub fn set_finished(&self) {
        self.notify_state("stopping", &[NotifyState::Stopping]);
    }

    fn notify_state(&self, status: &str, state: &[NotifyState]) {
        tracing::debug!(parent: &self.span, status, "Setting service status");
        if let Err(error) = notify(state) {
            tracing::error!(parent: &self.span, ?error, "Failed to notify systemd of state change");
        } else {
            tracing::info!(
                parent: &self.span,
                status,
                "Successfully notified systemd of service status"
            );
        }
    }
}

/// Daemon notification for the service manager.
#[derive(Clone, Debug)]
enum NotifyState<'a> {
    /// Service startup is finished.
    Ready,

    /// Service is stopping.
    Stopping,

    /// Free-form status message for the service manager.
    Status(&'a str),
}

impl std::fmt::Display for NotifyState<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NotifyState::Ready => write!(f, "READY=1"),
            NotifyState::Stopping => write!(f, "STOPPING=1"),
            NotifyState::Status(msg) => write!(f, "STATUS={msg}"),
        }
    }
}

fn connect_notify_socket() -> std::io::Result<Option<std::os::unix::net::UnixDatagram>> {
    let Some(socket_path) = std::env::var_os("NOTIFY_SOCKET") else {
        return Ok(None);
    };

    let sock = std::os::unix::net::UnixDatagram::unbound()?;

    sock.connect(socket_path)?;

    Ok(Some(sock))
}

fn notify(state: &[NotifyState]) -> std::io::Result<()> {
    use std::fmt::Write;

    let mut msg = String::new();

    let Some(sock) = connect_notify_socket()? else {
        return Ok(());
    };

    for s in state {
        let _ = writeln!(msg, "{s}");
    }

    let len = sock.send(msg.as_bytes())?;

    if len != msg.len() {
        Err(std::io::Error::new(
            std::io::ErrorKind::WriteZero,
            "incomplete write",
        ))
    } else {
        Ok(())
    }
}
