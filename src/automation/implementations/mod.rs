pub mod mock_engine;
pub mod webdriver_engine;

pub use mock_engine::{MockEngine, TargetScript};
pub use webdriver_engine::WebDriverEngine;
