#[macro_use]
extern crate log;

mod cfg;
mod cli;
mod gateways;

fn main() {
    dotenvy::dotenv().ok();
    env_logger::init();
    if let Err(err) = cli::run() {
        error!("{err:#}");
        std::process::exit(1);
    }
}
