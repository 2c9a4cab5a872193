use std::path::PathBuf;
use argh::FromArgs;

fn default_config_path () -> PathBuf {
    PathBuf::from("./stub_server_config.toml")
}

#[derive(Debug, FromArgs)]
#[argh(description = "UDP DNS server answering every A query with one configured address")]
pub struct CliArgs {
    #[argh(
        option,
        description = "config file path, default: './stub_server_config.toml'",
        default = "default_config_path()"
    )]
    pub config: PathBuf,
}
