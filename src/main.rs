mod app;
mod config;
mod logger;
mod parser;
mod plotter;
mod reader;
mod types;
mod utils;
mod window;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crossbeam_channel::bounded;
use dotenv::dotenv;
use eframe::egui;
use log::{error, info};

use app::AccelGraphApp;
use config::ConfigManager;

fn main() {
    dotenv().ok();
    logger::init_logger();
    info!("Application starting");

    let config = ConfigManager::discover();
    let settings = config.get_config().clone();

    let (input_sender, input_receiver) = bounded(settings.input.queue_capacity);
    let shutdown_signal = Arc::new(AtomicBool::new(false));

    if let Err(e) = reader::spawn_stdin_reader(input_sender, Arc::clone(&shutdown_signal)) {
        error!("Failed to start input reader: {}", e);
        std::process::exit(1);
    }

    let options = eframe::NativeOptions {
        vsync: settings.window.vsync,
        hardware_acceleration: if settings.window.hardware_acceleration {
            eframe::HardwareAcceleration::Preferred
        } else {
            eframe::HardwareAcceleration::Off
        },
        renderer: eframe::Renderer::Glow,
        viewport: egui::ViewportBuilder::default()
            .with_title(settings.window.title.clone())
            .with_inner_size([settings.window.width, settings.window.height])
            .with_resizable(settings.window.resizable),
        ..Default::default()
    };

    if let Err(e) = eframe::run_native(
        &settings.window.title,
        options,
        Box::new(move |_cc| Ok(Box::new(AccelGraphApp::new(input_receiver, config)))),
    ) {
        error!("GUI failed: {}", e);
        std::process::exit(1);
    }

    // a read blocked on stdin cannot be interrupted, so the reader is not joined
    info!("GUI closed, signaling reader to stop");
    shutdown_signal.store(true, Ordering::Relaxed);
}
