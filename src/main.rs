use std::process;

use aurora_backdrop::prelude::*;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // Optional first argument: a JSON parameter file, e.g. a console export
    let params = match std::env::args().nth(1) {
        Some(path) => match ParamSet::load(&path) {
            Ok(params) => {
                log::info!("loaded parameters from {}", path);
                params
            }
            Err(e) => {
                log::error!("{}: {}", path, e);
                process::exit(1);
            }
        },
        None => ParamSet::default(),
    };

    if let Err(e) = Backdrop::new().with_params(params).run() {
        log::error!("{}", e);
        process::exit(1);
    }
}
