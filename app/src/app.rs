use crate::logger::{Logger, ILOGGER};
use std::sync::Arc;
use tessel_ioc::injectable;

/// Contract key of the application.
pub const IAPP: &str = "IApp";

pub trait AppService: Send + Sync {
  fn run(&self);
}

pub struct App {
  logger: Arc<dyn Logger>,
}

impl App {
  pub fn new(logger: Arc<dyn Logger>) -> Self {
    Self { logger }
  }
}

impl AppService for App {
  fn run(&self) {
    self.logger.write(0, "App starting...");
  }
}

injectable!(App => new(ILOGGER => dyn Logger) as dyn AppService);
