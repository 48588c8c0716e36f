mod ui;

use daily_habits::config::AppConfig;
use daily_habits::logging;
use libadwaita::prelude::*;
use libadwaita::Application;
use ui::HabitApp;

const APP_ID: &str = "com.example.daily-habits";

fn main() {
    let (config, config_error) = match AppConfig::load() {
        Ok(config) => (config, None),
        Err(e) => (AppConfig::default(), Some(e)),
    };

    let logging_ready = match logging::init(config.debug_logging) {
        Ok(()) => true,
        Err(e) => {
            eprintln!("Failed to set up logging: {}", e);
            false
        }
    };
    if let Some(e) = config_error {
        if logging_ready {
            log::warn!("Ignoring config file: {}", e);
        } else {
            eprintln!("Ignoring config file: {}", e);
        }
    }

    let app = Application::builder()
        .application_id(APP_ID)
        .build();

    app.connect_activate(move |app| {
        match HabitApp::new(app, &config) {
            Ok(habit_app) => habit_app.show(),
            Err(e) => {
                log::error!("Failed to create app: {}", e);
                eprintln!("Failed to create app: {}", e);
            }
        }
    });

    app.run();
}
