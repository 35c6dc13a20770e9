use clap::Parser;
use rand::rngs::SmallRng;
use rand::SeedableRng;

use classroom::ScreenSize;
use classroom_common::config::Config;

mod app;
mod args;
mod draw;
mod logging;
mod scenes;

use app::{App, AppError};
use args::{Args, Exercise};
use scenes::SceneContext;

fn main() {
    // clion needs help in trait annotation
    let args = <Args as Parser>::parse();

    logging::init_logging(args.log.as_deref());

    if let Err(e) = run(args) {
        log::error!("{e}");
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<(), AppError> {
    let mut config = Config::load_or_default(args.config.as_deref())?;
    args.exercise.apply(&mut config);

    // the color grid is laid out for a fixed window
    let screen = match args.exercise {
        Exercise::Colors { .. } => ScreenSize::default(),
        _ => config.window.screen(),
    };

    let rng = match args.seed {
        Some(seed) => {
            log::info!("using seed {seed}");
            SmallRng::seed_from_u64(seed)
        }
        None => SmallRng::from_entropy(),
    };

    let app = App::new(args.exercise.title(), screen, config.window.vsync)?;

    let ctx = SceneContext {
        config,
        assets: args.assets,
        screen,
        rng,
    };
    let scene = scenes::create(&args.exercise, ctx)?;

    app.run(scene)
}
