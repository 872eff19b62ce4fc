use anyhow::Result;

use crate::avd;
use crate::cli::LsArgs;

pub async fn cmd_ls(args: LsArgs) -> Result<()> {
    let images = avd::list_images().unwrap_or_default();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&images)?);
        return Ok(());
    }

    if images.is_empty() {
        println!("no AVD images found");
        return Ok(());
    }

    println!("{:<30} {}", "NAME", "INI");
    for image in images {
        println!("{:<30} {}", image.name, image.ini_path.display());
    }

    Ok(())
}
