//! Ambersteel grid - command line access to actor inventory grids.

use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use ambersteel_domain::{
    ActorId, GridChange, GridItem, GridPosition, ItemId, ItemOrientation, ItemShape,
    PlacementVerdict,
};
use ambersteel_engine::infrastructure::ports::{LayoutRepo, PossessionRepo};
use ambersteel_engine::infrastructure::JsonActorStore;
use ambersteel_engine::use_cases::inventory_grid::MoveRequest;
use ambersteel_engine::{EngineConfig, InventoryGridUseCases};

const USAGE: &str = "Usage: ambersteel-grid <command> <actor> [args]

Commands:
  show   <actor>                                  print the grid
  check  <actor> <item> <x> <y> [orientation]     test a move without applying it
  move   <actor> <item> <x> <y> [orientation]     move an item, swapping if needed
  take   <actor> <item> <width> <height> [name]   add an item at the first free slot
  remove <actor> <item>                           remove an item
  sync   <actor>                                  reconcile the layout with possessions";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    load_dotenv_from_repo_root();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ambersteel_engine=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = EngineConfig::from_env().context("reading configuration")?;
    tracing::debug!(
        data_dir = %config.data_dir.display(),
        columns = config.grid_columns,
        tile_size = config.tile_size,
        "Configuration loaded"
    );

    let store = Arc::new(JsonActorStore::new(&config.data_dir));
    let possession_repo: Arc<dyn PossessionRepo> = store.clone();
    let layout_repo: Arc<dyn LayoutRepo> = store;
    let use_cases = InventoryGridUseCases::new(possession_repo, layout_repo, config.grid_columns);

    let args: Vec<String> = std::env::args().skip(1).collect();
    let Some((command, rest)) = args.split_first() else {
        anyhow::bail!("{USAGE}");
    };
    let actor_id = ActorId::new(arg(rest, 0, "actor")?)?;

    match command.as_str() {
        "show" => show(&use_cases, &actor_id).await,
        "check" => check(&use_cases, &actor_id, &rest[1..]).await,
        "move" => move_item(&use_cases, &actor_id, &rest[1..]).await,
        "take" => take(&use_cases, &actor_id, &rest[1..]).await,
        "remove" => {
            let item_id = ItemId::new(arg(rest, 1, "item")?)?;
            match use_cases.remove_item.execute(&actor_id, &item_id).await? {
                Some(placement) => println!("Removed {item_id} from {}", placement.position()),
                None => println!("Removed {item_id} (it had no place on the grid)"),
            }
            Ok(())
        }
        "sync" => {
            let report = use_cases.synchronize.execute(&actor_id).await?;
            if report.is_changed() {
                println!(
                    "removed {}, reshaped {}, added {}, unplaced {}",
                    report.removed.len(),
                    report.reshaped.len(),
                    report.added.len(),
                    report.unplaced.len()
                );
            } else {
                println!("Layout already in sync");
            }
            Ok(())
        }
        other => anyhow::bail!("Unknown command: {other}\n\n{USAGE}"),
    }
}

async fn show(use_cases: &InventoryGridUseCases, actor_id: &ActorId) -> anyhow::Result<()> {
    let loaded = use_cases.load.execute(actor_id).await?;
    let dims = loaded.grid.dimensions();
    println!(
        "{actor_id}: {} columns, {} tiles, {} free",
        dims.column_count(),
        dims.tile_count(),
        loaded.grid.free_cell_count()
    );
    print!("{}", loaded.grid.render_ascii());
    for item_id in &loaded.sync.unplaced {
        println!("no room for {item_id}");
    }
    if loaded.is_dirty() {
        println!("(stored layout is out of date; run `sync` to save)");
    }
    Ok(())
}

async fn check(
    use_cases: &InventoryGridUseCases,
    actor_id: &ActorId,
    args: &[String],
) -> anyhow::Result<()> {
    let loaded = use_cases.load.execute(actor_id).await?;
    let request = parse_move(args)?;
    let orientation = match request.orientation {
        Some(orientation) => orientation,
        None => loaded
            .grid
            .placement(&request.item_id)
            .map(|p| p.orientation())
            .unwrap_or_default(),
    };

    match loaded
        .grid
        .can_place(&request.item_id, request.target, orientation)?
    {
        PlacementVerdict::Unchanged => println!("allowed: item stays where it is"),
        PlacementVerdict::Allowed { swap_candidates } if swap_candidates.is_empty() => {
            println!("allowed")
        }
        PlacementVerdict::Allowed { swap_candidates } => {
            let ids: Vec<&str> = swap_candidates.iter().map(|p| p.item_id().as_str()).collect();
            println!("allowed, swapping {}", ids.join(", "));
        }
        PlacementVerdict::Rejected(reason) => println!("rejected: {reason}"),
    }
    Ok(())
}

async fn move_item(
    use_cases: &InventoryGridUseCases,
    actor_id: &ActorId,
    args: &[String],
) -> anyhow::Result<()> {
    let request = parse_move(args)?;

    match use_cases.move_item.execute(actor_id, request).await? {
        GridChange::Unchanged => println!("Nothing to do"),
        GridChange::Moved {
            item_id,
            from,
            to,
            swapped,
            ..
        } => {
            println!("Moved {item_id} from {from} to {to}");
            for swap in swapped {
                println!("  {} from {} to {}", swap.item_id, swap.from, swap.to);
            }
        }
    }
    Ok(())
}

async fn take(
    use_cases: &InventoryGridUseCases,
    actor_id: &ActorId,
    args: &[String],
) -> anyhow::Result<()> {
    let item_id = ItemId::new(arg(args, 0, "item")?)?;
    let width = number(args, 1, "width")?;
    let height = number(args, 2, "height")?;
    let mut item = GridItem::new(item_id, ItemShape::new(width, height)?);
    if args.len() > 3 {
        item = item.with_name(args[3..].join(" "));
    }

    let placement = use_cases.take_item.execute(actor_id, item).await?;
    println!(
        "Placed {} at {} ({})",
        placement.item_id(),
        placement.position(),
        placement.orientation()
    );
    Ok(())
}

/// `<item> <x> <y> [orientation]`; a missing orientation keeps the current one.
fn parse_move(args: &[String]) -> anyhow::Result<MoveRequest> {
    let item_id = ItemId::new(arg(args, 0, "item")?)?;
    let target = GridPosition::new(number(args, 1, "x")?, number(args, 2, "y")?);
    let orientation = args
        .get(3)
        .map(|value| value.parse::<ItemOrientation>())
        .transpose()?;
    Ok(MoveRequest {
        item_id,
        target,
        orientation,
    })
}

fn arg<'a>(args: &'a [String], index: usize, name: &str) -> anyhow::Result<&'a str> {
    args.get(index)
        .map(String::as_str)
        .with_context(|| format!("missing <{name}>\n\n{USAGE}"))
}

fn number(args: &[String], index: usize, name: &str) -> anyhow::Result<u32> {
    arg(args, index, name)?
        .parse()
        .with_context(|| format!("<{name}> must be a non-negative integer"))
}

fn load_dotenv_from_repo_root() {
    let repo_root = std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..");

    // Prefer local overrides.
    for filename in [".env.local", ".env"] {
        let path = repo_root.join(filename);
        if path.exists() {
            let _ = dotenvy::from_path(path);
        }
    }
}
