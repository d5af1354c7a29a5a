use super::{DEFAULT_CSVIN, DEFAULT_PNGOUT, VERSION};
use clap::{App, Arg, ArgMatches};
use std::ffi::OsString;
use std::path::PathBuf;

/// Paths and verbosity for one plotting run
#[derive(Debug, Clone, PartialEq)]
pub struct PlotArgs {
    pub csvin: PathBuf,
    pub pngout: PathBuf,
    pub verbose: bool,
}

/// The CLI definition; without arguments the default file names are used.
pub fn cli_app<'a, 'b>() -> App<'a, 'b> {
    let arg_csvin = Arg::with_name("input_csvfile")
        .help("csv file with the num_instances and recovery_time_sec columns")
        .short("f")
        .long("csvfile")
        .takes_value(true)
        .default_value(DEFAULT_CSVIN);
    let arg_pngout = Arg::with_name("output_pngfile")
        .help("name of the output png file, overwritten if present")
        .short("o")
        .long("pngfile")
        .takes_value(true)
        .default_value(DEFAULT_PNGOUT);
    let arg_verbose = Arg::with_name("verbose")
        .help("print debug information")
        .short("v")
        .long("verbose")
        .takes_value(false)
        .required(false);
    App::new("recovery_plot")
        .version(VERSION.unwrap_or("unknown"))
        .author("Luca Peruzzo")
        .about("cli app to plot the recovery time against the number of instances")
        .arg(arg_csvin)
        .arg(arg_pngout)
        .arg(arg_verbose)
}

/// Takes the CLI arguments that control the plotting of the recovery times.
pub fn parse_cli() -> PlotArgs {
    args_from_matches(&cli_app().get_matches())
}

/// Same as `parse_cli`, from an explicit argument list (first item is the binary name)
pub fn parse_cli_from<I, T>(args: I) -> PlotArgs
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    args_from_matches(&cli_app().get_matches_from(args))
}

fn args_from_matches(cli_args: &ArgMatches) -> PlotArgs {
    PlotArgs {
        csvin: PathBuf::from(cli_args.value_of("input_csvfile").unwrap_or(DEFAULT_CSVIN)),
        pngout: PathBuf::from(cli_args.value_of("output_pngfile").unwrap_or(DEFAULT_PNGOUT)),
        verbose: cli_args.is_present("verbose"),
    }
}
