#[macro_use] extern crate clap;

use clap::App;
use env_logger::{from_env, Env};
use imagescope::{registry::RegistryId, source::JsonFiles, ImageForm};
use std::path::Path;

fn main() {
    let yaml = load_yaml!("cli.yml");
    let matches = App::from_yaml(yaml).get_matches();

    let log_level = matches.value_of("log_level").unwrap();
    from_env(Env::default().default_filter_or(log_level)).init();

    let source = JsonFiles::new(Path::new(matches.value_of("data_dir").unwrap()));
    let environment = value_t!(matches, "environment", u32).unwrap_or_else(|e| e.exit());
    let mut form = ImageForm::load(&source, environment);

    if let Some(id) = matches.value_of("registry") {
        match id.parse::<RegistryId>() {
            Ok(id) => form.select(Some(id)),
            Err(err) => {
                log::error!("{}", err);
                std::process::exit(2);
            }
        }
        if form.selected().is_none() {
            log::warn!("registry {} is not known, showing unregistered images", id);
        }
    }

    match matches.subcommand() {
        ("options", _) => {
            for option in form.options() {
                println!("{}\t{}", option.value, option.label);
            }
        }
        ("prefix", _) => println!("{}", form.prefix()),
        ("images", _) => {
            for image in form.suggestions() {
                println!("{}", image);
            }
        }
        ("search", Some(sub)) => {
            let image = sub.value_of("image").unwrap();
            if !form.shows_docker_hub_search() {
                log::warn!("selected registry is not Docker Hub");
            }
            println!("{}", form.defaults().search_url(image));
        }
        _ => unreachable!(),
    }
}
