use tracing::{
  error,
  warn
};

/// Why the backend is going down.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shutdown {
  Interrupt,
  Terminate
}

impl Shutdown {
  pub fn name(self) -> &'static str {
    match self {
      | Self::Interrupt => "SIGINT",
      | Self::Terminate => "SIGTERM"
    }
  }
}

/// Exits the app on the first SIGINT or
/// SIGTERM (ctrl-c elsewhere).
pub fn watch(app: tauri::AppHandle) {
  tauri::async_runtime::spawn(
    async move {
      let reason = next_signal().await;
      warn!(
        signal = reason.name(),
        "shutting down dashboard backend"
      );
      app.exit(0);
    }
  );
}

#[cfg(unix)]
async fn next_signal() -> Shutdown {
  use tokio::signal::unix::{
    SignalKind,
    signal
  };

  let streams =
    signal(SignalKind::interrupt())
      .and_then(|interrupt| {
        Ok((
          interrupt,
          signal(SignalKind::terminate())?
        ))
      });

  match streams {
    | Ok((mut interrupt, mut terminate)) => {
      tokio::select! {
        _ = interrupt.recv() => Shutdown::Interrupt,
        _ = terminate.recv() => Shutdown::Terminate,
      }
    }
    | Err(error) => {
      error!(
        %error,
        "unix signal streams \
         unavailable; listening for \
         ctrl-c only"
      );
      ctrl_c().await
    }
  }
}

#[cfg(not(unix))]
async fn next_signal() -> Shutdown {
  ctrl_c().await
}

/// Never resolves if the listener cannot
/// be installed; the window close path
/// still ends the app.
async fn ctrl_c() -> Shutdown {
  if let Err(error) =
    tokio::signal::ctrl_c().await
  {
    error!(
      %error,
      "ctrl-c listener failed"
    );
    std::future::pending::<()>().await;
  }
  Shutdown::Interrupt
}
