use std::process;

use clap::{Arg, ArgAction, Command};

use bbissues::commands::{handle_auth, handle_bulk_delete, handle_bulk_spam, handle_find};
use bbissues::logging::{get_log_file_path, init_logging, log_panic_info};
use bbissues::BbError;

fn page_url_arg() -> Arg {
    Arg::new("page-url")
        .help("URL of the Bitbucket issue list page, e.g. https://bitbucket.org/acme/widgets/issues?status=new")
        .required(true)
        .index(1)
}

fn ids_arg() -> Arg {
    Arg::new("ids")
        .help("Issue IDs (space or comma separated)")
        .required(true)
        .num_args(1..)
        .index(2)
}

#[tokio::main]
async fn main() {
    if let Err(e) = init_logging() {
        eprintln!("Warning: logging disabled: {}", e);
    }
    std::panic::set_hook(Box::new(|info| log_panic_info(info)));

    let app = Command::new("bbissues")
        .about("Bulk find and delete Bitbucket issues from an issue list page")
        .version(env!("CARGO_PKG_VERSION"))
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("auth")
                .about("Store the Bitbucket username and app password")
                .arg(
                    Arg::new("username")
                        .long("username")
                        .short('u')
                        .help("Bitbucket username")
                        .requires("app-password"),
                )
                .arg(
                    Arg::new("app-password")
                        .long("app-password")
                        .short('p')
                        .help("Bitbucket app password with issue write access")
                        .requires("username"),
                )
                .arg(
                    Arg::new("show")
                        .long("show")
                        .help("Show the stored credentials")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            Command::new("find")
                .about("Find every issue matching the page's status filter and a title search")
                .arg(page_url_arg())
                .arg(
                    Arg::new("search")
                        .help("Case-insensitive text the issue title must contain")
                        .index(2),
                )
                .arg(
                    Arg::new("format")
                        .long("format")
                        .short('f')
                        .help("Output format")
                        .value_parser(["table", "json"])
                        .default_value("table"),
                )
                .arg(
                    Arg::new("delete")
                        .long("delete")
                        .help("Select and delete every matched issue")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            Command::new("delete")
                .about("Delete issues concurrently")
                .arg(page_url_arg())
                .arg(ids_arg()),
        )
        .subcommand(
            Command::new("spam")
                .about("Mark issues as spam")
                .arg(page_url_arg())
                .arg(ids_arg()),
        );

    let matches = app.get_matches();

    let result = match matches.subcommand() {
        Some(("auth", sub_matches)) => handle_auth(sub_matches).await,
        Some(("find", sub_matches)) => handle_find(sub_matches).await,
        Some(("delete", sub_matches)) => handle_bulk_delete(sub_matches).await,
        Some(("spam", sub_matches)) => handle_bulk_spam(sub_matches).await,
        _ => {
            eprintln!("Unknown command. Use 'bbissues --help' for available commands.");
            process::exit(1);
        }
    };

    if let Err(e) = result {
        let reported = e.downcast_ref::<BbError>().map_or(false, BbError::is_reported);
        if !reported {
            tracing::error!("{}", e);
            eprintln!("Error: {}", e);
        }
        if let Some(path) = get_log_file_path() {
            eprintln!("Details were logged to {}", path.display());
        }
        process::exit(1);
    }
}
