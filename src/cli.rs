use clap::{Arg, ArgMatches, Command};

pub(crate) fn configure_cli() -> ArgMatches {
    Command::new("dockhand")
        .version("0.1.0")
        .about("run platform apps as docker containers on this host")
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .help("Path to the config file")
                .value_name("PATH")
                .default_value("dockhand.toml"),
        )
        .subcommand_required(true)
        .subcommand(Command::new("status").about("Collect and print the status of every unit"))
        .subcommand(
            Command::new("deploy")
                .about("Deploy one new container for an app")
                .arg(Arg::new("app").required(true))
                .arg(Arg::new("platform").required(true)),
        )
        .subcommand(
            Command::new("restart")
                .about("Stop and start every container of an app")
                .arg(Arg::new("app").required(true)),
        )
        .subcommand(
            Command::new("destroy")
                .about("Schedule removal of all of an app's containers")
                .arg(Arg::new("app").required(true)),
        )
        .subcommand(
            Command::new("remove-unit")
                .about("Remove a single unit of an app")
                .arg(Arg::new("app").required(true))
                .arg(Arg::new("unit").required(true)),
        )
        .subcommand(
            Command::new("exec")
                .about("Run a command in every container of an app")
                .arg(Arg::new("app").required(true))
                .arg(Arg::new("cmd").required(true))
                .arg(
                    Arg::new("args")
                        .num_args(0..)
                        .trailing_var_arg(true)
                        .allow_hyphen_values(true),
                ),
        )
        .subcommand(
            Command::new("addr")
                .about("Print the app's public address")
                .arg(Arg::new("app").required(true)),
        )
        .get_matches()
}
