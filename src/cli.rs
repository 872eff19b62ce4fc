use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "avdboot",
    version,
    about = "Boots an Android emulator and waits until it is ready to use"
)]
pub struct Cli {
    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Launch an AVD image and wait for Android to finish booting
    Start(StartArgs),
    /// List AVD images discoverable on this machine
    Ls(LsArgs),
}

#[derive(Args, Debug)]
pub struct StartArgs {
    /// Name of the AVD image to boot (required)
    #[arg(long = "image-name", env = "image_name")]
    pub image: Option<String>,

    /// SDK root containing platform-tools/ and tools/ (required)
    #[arg(long = "platform-tools-home", env = "platform_tools_home")]
    pub sdk_home: Option<String>,

    /// Display skin passed to the launcher
    #[arg(long, env = "skin")]
    pub skin: Option<String>,

    /// Custom RAM size in MB passed to the launcher
    #[arg(long, env = "ram")]
    pub ram: Option<String>,
}

#[derive(Args, Debug)]
pub struct LsArgs {
    /// Output JSON instead of a listing
    #[arg(long)]
    pub json: bool,
}
