use std::env;
use std::error::Error;
use std::process;

use labrc::commands::{backup, edit, plugins, recent, show};
use labrc::settings::{settings_path, SettingsStore};

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("{e}");
        let mut source = e.source();
        while let Some(cause) = source {
            eprintln!("  caused by: {cause}");
            source = cause.source();
        }
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn Error>> {
    let args: Vec<String> = env::args().collect();

    let path = settings_path();
    let mut store = SettingsStore::open(&path)?;

    match args.get(1).map(String::as_str) {
        Some("show") => {
            let filt = if args.get(2).map(String::as_str) == Some("--filter") {
                args.get(3).cloned()
            } else {
                None
            };
            show::show_settings(&store, filt);
        }
        Some("get") => match (args.get(2), args.get(3)) {
            (Some(section), Some(key)) => edit::get_value(&store, section, key),
            _ => println!("Usage: labrc get <section> <key>"),
        },
        Some("set") => match (args.get(2), args.get(3)) {
            (Some(section), Some(key)) => {
                edit::set_value(&mut store, section, key, args.get(4).map(String::as_str))?
            }
            _ => println!("Usage: labrc set <section> <key> [value]"),
        },
        Some("unset") => match (args.get(2), args.get(3)) {
            (Some(section), Some(key)) => edit::unset_value(&mut store, section, key)?,
            _ => println!("Usage: labrc unset <section> <key>"),
        },
        Some("purge") => match args.get(2) {
            Some(section) => edit::purge_section(&mut store, section)?,
            None => println!("Usage: labrc purge <section>"),
        },
        Some("edit") => edit::edit(&mut store)?,
        Some("recent") => match (args.get(2).map(String::as_str), args.get(3)) {
            (Some("add"), Some(file)) => recent::recent_add(&mut store, file)?,
            (Some("clear"), _) => recent::recent_clear(&mut store)?,
            (None, _) => recent::recent_list(&store),
            _ => println!("Usage: labrc recent [add <path>|clear]"),
        },
        Some("backup") => match (args.get(2).map(String::as_str), args.get(3)) {
            (Some("add"), Some(file)) => backup::backup_add(&mut store, file)?,
            (None, _) => backup::backup_list(&store),
            _ => println!("Usage: labrc backup [add <path>]"),
        },
        Some("plugin") => match (
            args.get(2).map(String::as_str),
            args.get(3).map(String::as_str),
            args.get(4),
        ) {
            (Some("locate"), Some(name), _) => plugins::locate_plugin(&store, name)?,
            (Some("paths"), None, _) => plugins::paths_list(&store),
            (Some("paths"), Some("add"), Some(dir)) => plugins::paths_add(&mut store, dir)?,
            (Some("paths"), Some("del"), Some(dir)) => plugins::paths_del(&mut store, dir)?,
            _ => println!("Usage: labrc plugin [locate <name>|paths|paths add <dir>|paths del <dir>]"),
        },
        Some("help") => {
            println!("Usage:");
            println!("  labrc show [--filter \"section:plug* key:path value:2024*\"]");
            println!("  labrc get <section> <key> | set <section> <key> [value] | unset <section> <key>");
            println!("  labrc purge <section>            # empty a section (asks first)");
            println!("  labrc edit                       # interactive");
            println!("  labrc recent [add <path>|clear]");
            println!("  labrc backup [add <path>]");
            println!("  labrc plugin locate <name> | plugin paths [add <dir>|del <dir>]");
        }
        _ => println!("Usage: labrc [show|get|set|unset|purge|edit|recent|backup|plugin|help]"),
    }

    Ok(())
}
