use std::process;

use env_logger::Env;
use log::error;

use dispatcher_simulator::config::Config;
use dispatcher_simulator::kernel::Driver;

fn main() {
    let env = Env::default()
        .filter_or("SIM_LOG_LEVEL", "info")
        .write_style_or("SIM_LOG_STYLE", "auto");
    env_logger::init_from_env(env);

    let config = Config::from_args(std::env::args().skip(1)).unwrap_or_else(|err| {
        error!("{}", err);
        process::exit(2);
    });

    let mut driver = Driver::new(config);
    if let Err(err) = driver.start() {
        error!("{}", err);
        process::exit(1);
    }
}
