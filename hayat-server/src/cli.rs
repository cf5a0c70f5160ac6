use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "hayat-server",
    about = "Hayat Ai - chat, image, video and app generation over HTTP",
    version = env!("CARGO_PKG_VERSION"),
    author
)]
pub struct Cli {
    #[arg(short, long, env = "HAYAT_PORT", default_value = "8046")]
    pub port: u16,

    #[arg(long, env = "HAYAT_HOST", default_value = "127.0.0.1")]
    pub host: String,

    #[arg(short, long, env = "RUST_LOG", default_value = "info")]
    pub log_level: String,
}
