use clap::{Arg, Command};
use pipeburst::app_logic;

fn main() {
    let matches = Command::new("PipeBurst")
        .version("0.1.0")
        .about("Burst pressure and operating stress assessment of corroded pipe segments")
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .help("Path to the YAML run configuration")
                .required(true),
        )
        .after_help(
            "Computes intact (Von Mises, Tresca) and corroded (ASME B31G 2013, DNV, \
             PCORRC) burst pressures plus the Von Mises equivalent stress at the \
             maximum and minimum operating pressure for one pipe segment.",
        )
        .get_matches();
    if let Some(path) = matches.get_one::<String>("config") {
        if let Err(err) = app_logic::run(path) {
            eprintln!("Error: {}", err);
            std::process::exit(1);
        }
    }
}
