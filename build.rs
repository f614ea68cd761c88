// build.rs

use clap::{Arg, ArgAction, Command};
use clap_mangen::Man;
use std::env;
use std::fs;
use std::path::PathBuf;

fn tool_args(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("apt_config")
            .long("apt-config")
            .value_name("PATH")
            .default_value("apt-config")
            .global(true)
            .help("apt-config binary used to discover paths"),
    )
    .arg(
        Arg::new("apt_get")
            .long("apt-get")
            .value_name("PATH")
            .default_value("apt-get")
            .global(true)
            .help("apt-get binary"),
    )
    .arg(
        Arg::new("dpkg")
            .long("dpkg")
            .value_name("PATH")
            .default_value("dpkg")
            .global(true)
            .help("dpkg binary"),
    )
    .arg(
        Arg::new("apt_key")
            .long("apt-key")
            .value_name("PATH")
            .default_value("/usr/bin/apt-key")
            .global(true)
            .help("apt-key script scraped for its trusted parts directory"),
    )
}

fn build_cli() -> Command {
    let cmd = Command::new("aptshim")
        .version(env!("CARGO_PKG_VERSION"))
        .author("aptshim Contributors")
        .about("Convenience layer over apt-get, dpkg and apt-config")
        .subcommand_required(false);

    tool_args(cmd)
        .subcommand(
            Command::new("paths")
                .about("Show the resolved apt and dpkg locations")
                .arg(
                    Arg::new("json")
                        .long("json")
                        .action(ArgAction::SetTrue)
                        .help("Print as JSON"),
                ),
        )
        .subcommand(Command::new("signatures").about("List cached InRelease files"))
        .subcommand(
            Command::new("packages")
                .about("List packages from the dpkg status database")
                .arg(
                    Arg::new("all")
                        .short('a')
                        .long("all")
                        .action(ArgAction::SetTrue)
                        .help("Include packages that are not fully installed"),
                ),
        )
        .subcommand(
            Command::new("files")
                .about("List files installed by a package")
                .arg(Arg::new("package").required(true).help("Package name")),
        )
        .subcommand(
            Command::new("install")
                .about("Install packages with apt-get")
                .arg(
                    Arg::new("packages")
                        .required(true)
                        .num_args(1..)
                        .help("Package names"),
                ),
        )
        .subcommand(
            Command::new("remove")
                .about("Remove packages with apt-get")
                .arg(
                    Arg::new("packages")
                        .required(true)
                        .num_args(1..)
                        .help("Package names"),
                ),
        )
        .subcommand(
            Command::new("purge").about("Remove unused packages along with their configuration"),
        )
        .subcommand(
            Command::new("dpkg-install")
                .about("Install local .deb archives with dpkg")
                .arg(
                    Arg::new("archives")
                        .required(true)
                        .num_args(1..)
                        .help("Paths to .deb files"),
                ),
        )
        .subcommand(
            Command::new("completions")
                .about("Generate shell completions")
                .arg(
                    Arg::new("shell")
                        .required(true)
                        .value_parser(["bash", "elvish", "fish", "powershell", "zsh"])
                        .help("Shell to generate completions for"),
                ),
        )
}

fn main() {
    println!("cargo:rerun-if-changed=build.rs");

    // Create man directory
    let out_dir = PathBuf::from(env::var("CARGO_MANIFEST_DIR").unwrap());
    let man_dir = out_dir.join("man");
    fs::create_dir_all(&man_dir).expect("Failed to create man directory");

    // Generate main man page
    let cmd = build_cli();
    let man = Man::new(cmd);
    let mut buffer = Vec::new();
    man.render(&mut buffer)
        .expect("Failed to render man page");

    let man_path = man_dir.join("aptshim.1");
    fs::write(&man_path, buffer).expect("Failed to write man page");

    println!("cargo:warning=Man page generated at {}", man_path.display());
}
