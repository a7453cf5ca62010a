pub mod tasks;
pub mod telemetry;

fn err_to_string(
  err: anyhow::Error
) -> String {
  err.to_string()
}
