use anyhow::{Context, Result, bail};
use gdmc_client::build_area::NOT_CONFIGURED_HINT;
use gdmc_client::{BlockEdit, BlockOffset, BlockState, ClientConfig, Error, GdmcClient, Vector2Int};

const USAGE: &str = "usage: gdmc [--host <url>] <command>

commands:
  buildarea                        print the configured build area
  terrain <x> <z> <dx> <dz>        fetch dx*dz chunks starting at world position (x, z)
  place <x> <y> <z> <block-state>  place one block, e.g. `place 0 64 0 minecraft:stone`";

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let host = args.iter().skip_while(|a| *a != "--host").nth(1).cloned();
    let positional = positional_args(&args);

    let mut config = ClientConfig::from_env();
    if let Some(host) = host {
        config = config.with_base_url(host);
    }
    let mut client = GdmcClient::new(&config).context("creating client")?;
    tracing::info!("Using server at {}", client.transport().base_url());

    match positional.as_slice() {
        ["buildarea"] => build_area(&client).await,
        ["terrain", x, z, dx, dz] => {
            let origin = Vector2Int::new(int(x, "x")?, int(z, "z")?);
            terrain(&mut client, origin, int(dx, "dx")?, int(dz, "dz")?).await
        }
        ["place", x, y, z, state] => {
            let origin = BlockOffset::new(int(x, "x")?, int(y, "y")?, int(z, "z")?);
            place(&client, origin, state).await
        }
        _ => {
            eprintln!("{}", USAGE);
            bail!("unrecognised command line: {:?}", args);
        }
    }
}

async fn build_area(client: &GdmcClient) -> Result<()> {
    match client.get_build_area().await {
        Ok(area) => {
            println!(
                "build area: {:?} -> {:?} (size {:?})",
                area.from_corner(),
                area.to_corner(),
                area.size()
            );
            if !area.is_ordered() {
                tracing::warn!("Build area corners are not ordered min -> max");
            }
            Ok(())
        }
        Err(Error::NotConfigured { .. }) => {
            println!("{}", NOT_CONFIGURED_HINT);
            Ok(())
        }
        Err(e) => Err(e).context("querying build area"),
    }
}

async fn terrain(client: &mut GdmcClient, origin: Vector2Int, dx: i32, dz: i32) -> Result<()> {
    let document = client
        .get_terrain(origin, dx, dz)
        .await
        .with_context(|| format!("fetching terrain at {}", origin))?;
    println!("terrain at chunk {}: {} bytes of NBT", origin.to_chunk(), document.payload().len());
    for key in document.keys() {
        println!("  {}", key);
    }
    Ok(())
}

async fn place(client: &GdmcClient, origin: BlockOffset, state: &str) -> Result<()> {
    let state = BlockState::parse(state).with_context(|| format!("parsing `{}`", state))?;
    let edit = BlockEdit::new(BlockOffset::ORIGIN, state);
    let reply = client
        .put_blocks(&[edit], origin)
        .await
        .context("placing block")?;
    println!("{}", reply);
    Ok(())
}

/// Arguments other than `--host <url>`.
fn positional_args(args: &[String]) -> Vec<&str> {
    let mut out = Vec::new();
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        if arg == "--host" {
            iter.next();
            continue;
        }
        out.push(arg.as_str());
    }
    out
}

fn int(value: &str, name: &str) -> Result<i32> {
    value
        .parse()
        .with_context(|| format!("{} must be an integer, got `{}`", name, value))
}
