use tessel_ioc::injectable;

/// Contract key of the logging capability.
pub const ILOGGER: &str = "ILogger";

pub trait Logger: Send + Sync {
  fn write(&self, level: i32, message: &str);
}

/// Writes every message to stdout, whatever its level.
#[derive(Debug, Default)]
pub struct ConsoleLogger;

impl Logger for ConsoleLogger {
  fn write(&self, _level: i32, message: &str) {
    println!("{}", message);
  }
}

injectable!(ConsoleLogger => default() as dyn Logger);
