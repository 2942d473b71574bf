
mod application;
mod composite;
mod config;
mod error;
mod resize;

use std::path::Path;
use std::process;

use clap::App;
use clap::Arg;
use clap::ArgMatches;
use clap::SubCommand;

use application::AppOptions;
use application::Application;
use config::ConfigFile;
use error::MergeResult;


const VERSION: &'static str = env!("CARGO_PKG_VERSION");
const AUTHORS: &'static str = env!("CARGO_PKG_AUTHORS");


fn build_app() -> App<'static, 'static> {
    let config = Arg::with_name("config")
        .short("c")
        .long("config")
        .help("json file with default options; command line flags win")
        .takes_value(true);
    let input = Arg::with_name("input")
        .short("i")
        .long("input")
        .help("foreground image with transparency, default is \"google.png\"")
        .takes_value(true);
    let output = Arg::with_name("output")
        .short("o")
        .long("output")
        .help("output png, default is \"Merged.png\"")
        .takes_value(true);

    App::new("alpha merge")
        .version(VERSION)
        .author(AUTHORS)
        .subcommand(
            SubCommand::with_name("flatten")
            .about("replace transparent pixels with a solid colour")
            .arg(config.clone())
            .arg(input.clone())
            .arg(output.clone())
            .arg(
                Arg::with_name("fill")
                .long("fill")
                .help("fill colour as #RRGGBB or #RRGGBBAA, default is white")
                .takes_value(true)
            )
        )
        .subcommand(
            SubCommand::with_name("merge")
            .about("resize the foreground onto a background image")
            .arg(config)
            .arg(input)
            .arg(output)
            .arg(
                Arg::with_name("background")
                .short("b")
                .long("background")
                .help("background image, default is \"background.jpg\"")
                .takes_value(true)
            )
            .arg(
                Arg::with_name("filter")
                .long("filter")
                .help("filter used in scale, can be \"nearest\", \"triangle\", \"gaussian\", \"catmullrom\", \"lanczos3\"; default is \"lanczos3\"")
                .takes_value(true)
            )
            .arg(
                Arg::with_name("scale_mode")
                .long("scale_mode")
                .help("\"stretch\" fits both axes to the background, \"height\" uses the truncated height ratio; default is \"stretch\"")
                .takes_value(true)
            )
        )
}

fn build_options(name: &str, args: &ArgMatches) -> MergeResult<AppOptions> {
    let mut options = AppOptions::default();
    if let Some(path) = args.value_of("config") {
        ConfigFile::load(Path::new(path))?.apply(&mut options)?;
    }
    if let Some(path) = args.value_of("input") {
        options.set_foreground(path);
    }
    if let Some(path) = args.value_of("output") {
        options.set_output(path);
    }
    match name {
        "flatten" => {
            if options.background().is_some() {
                log::debug!("flatten ignores the configured background");
            }
            options.clear_background();
            if let Some(fill) = args.value_of("fill") {
                options.set_fill(fill)?;
            }
        },
        "merge" => {
            if let Some(path) = args.value_of("background") {
                options.set_background(path);
            } else if options.background().is_none() {
                options.set_background(application::DEFAULT_BACKGROUND);
            }
            if let Some(filter) = args.value_of("filter") {
                options.set_filter(filter)?;
            }
            if let Some(mode) = args.value_of("scale_mode") {
                options.set_scale_mode(mode)?;
            }
        },
        _ => { }
    }
    Ok(options)
}

/// Exit status for one invocation: 0 on success or when only usage was
/// printed, 1 on any failure.
fn run(matches: &ArgMatches) -> i32 {
    let (name, args) = matches.subcommand();
    let args = if let Some(v) = args {
        v
    } else {
        println!("{}", matches.usage());
        return 0;
    };

    let result = build_options(name, args).and_then(|options| Application::new(options).run());
    match result {
        Ok(summary) => {
            log::info!("> {} ({}x{})", summary.output.display(), summary.width, summary.height);
            println!("Image processing completed successfully");
            0
        },
        Err(e) => {
            eprintln!("{}", e);
            1
        }
    }
}

fn main() {

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let matches = build_app().get_matches();
    let code = run(&matches);
    if code != 0 {
        process::exit(code);
    }
}
