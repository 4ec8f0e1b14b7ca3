use crate::CLAP_STYLING;
use clap::{arg, command};

pub(crate) fn command_argument_builder() -> clap::Command {
    clap::Command::new("rankfetch")
        .version(env!("CARGO_PKG_VERSION"))
        .bin_name("rankfetch")
        .styles(CLAP_STYLING)
        .arg(arg!(-q --"quiet" "Suppress banner and non-essential output").required(false))
        .subcommand_required(false)
        .subcommand(
            command!("fetch")
                .about(
                    "Fetch ranking metrics for a list of domains and tabulate the results. \
                Failed lookups are recorded per domain, not fatal.",
                )
                .arg(
                    arg!(-d --"domain" <DOMAIN>)
                        .required(false)
                        .help("A domain to look up (repeatable)")
                        .action(clap::ArgAction::Append)
                        .conflicts_with("domains-file"),
                )
                .arg(
                    arg!(-D --"domains-file" <PATH>)
                        .required(false)
                        .help("Path to a newline-delimited file of domains to look up")
                        .value_parser(clap::value_parser!(std::path::PathBuf))
                        .conflicts_with("domain"),
                )
                .arg(
                    arg!(-m --"metrics" <LIST>)
                        .required(false)
                        .help(
                            "Comma-separated metrics to request \
                        (default: domain_trust,backlinks,organic_traffic)",
                        ),
                )
                .arg(
                    arg!(-k --"api-key" <KEY>)
                        .required(false)
                        .help("Ranking service API key (default: SE_RANKING_API_KEY env variable)"),
                )
                .arg(
                    arg!(--"auth-scheme" <SCHEME>)
                        .required(false)
                        .help("Authorization header scheme")
                        .value_parser(["bearer", "token"])
                        .default_value("token"),
                )
                .arg(
                    arg!(--"base-url" <URL>)
                        .required(false)
                        .help("Ranking service base URL")
                        .default_value("https://api.seranking.com"),
                )
                .arg(
                    arg!(--"endpoint-path" <PATH>)
                        .required(false)
                        .help("Ranking service endpoint path")
                        .default_value("/v3/domain/overview"),
                )
                .arg(
                    arg!(--"query-param" <NAME>)
                        .required(false)
                        .help("Query parameter used to pass the domain")
                        .default_value("domain"),
                )
                .arg(
                    arg!(--"timeout" <SECONDS>)
                        .required(false)
                        .help("Request timeout in seconds")
                        .value_parser(clap::value_parser!(u64))
                        .default_value("10"),
                )
                .arg(
                    arg!(-f --"format" <FORMAT>)
                        .required(false)
                        .help("Report format: text, json, csv")
                        .value_parser(["text", "json", "csv"])
                        .default_value("text"),
                )
                .arg(
                    arg!(-o --"output" <PATH>)
                        .required(false)
                        .help("Save report to file (default: print to stdout)")
                        .value_parser(clap::value_parser!(std::path::PathBuf)),
                ),
        )
        .subcommand(command!("metrics").about("List the metrics the ranking service can report"))
}
