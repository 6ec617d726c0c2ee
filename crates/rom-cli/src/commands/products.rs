use anyhow::Result;
use clap::Subcommand;
use rom_client::fetch_products;
use rom_menu::{ProductCatalog, ProductEdit, ProductId, ProductInput};
use rom_schemas::Product;

use super::{print_origin, Ctx};

#[derive(Subcommand)]
pub enum ProductsCmd {
    /// List the menu
    List,

    /// Add a product
    Create {
        #[arg(long)]
        name: String,

        /// Price, "12.50" or "12,50"
        #[arg(long, allow_hyphen_values = true)]
        price: String,
    },

    /// Change a product's name and/or price
    Update {
        #[arg(long)]
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long, allow_hyphen_values = true)]
        price: Option<String>,
    },

    /// Remove a product
    Delete {
        #[arg(long)]
        id: String,
    },
}

pub async fn run(config_paths: &[String], cmd: ProductsCmd) -> Result<()> {
    match cmd {
        ProductsCmd::List => {
            let ctx = Ctx::load(config_paths)?;
            let client = ctx.session.client(&ctx.api);
            let fetched = fetch_products(&client, ctx.settings.degraded_mode).await?;
            print_origin(&fetched.origin);
            for p in &fetched.value {
                print_product(p);
            }
            println!("count={}", fetched.value.len());
        }
        ProductsCmd::Create { name, price } => {
            // Validate before touching config, session or network.
            let input = ProductInput::new(&name, &price)?;
            let ctx = Ctx::load(config_paths)?;
            let mut catalog = ProductCatalog::new(ctx.session.client(&ctx.api));
            let created = catalog.create(input.as_request()).await?;
            print!("created=true ");
            print_product(created);
        }
        ProductsCmd::Update { id, name, price } => {
            let edit = ProductEdit::new(name.as_deref(), price.as_deref())?;
            let id = parse_id(&id);
            let ctx = Ctx::load(config_paths)?;
            let mut catalog = ProductCatalog::new(ctx.session.client(&ctx.api));
            catalog.update(&id, edit.as_patch()).await?;
            println!("updated=true id={id}");
        }
        ProductsCmd::Delete { id } => {
            let id = parse_id(&id);
            let ctx = Ctx::load(config_paths)?;
            let mut catalog = ProductCatalog::new(ctx.session.client(&ctx.api));
            catalog.delete(&id).await?;
            println!("deleted=true id={id}");
        }
    }
    Ok(())
}

fn parse_id(raw: &str) -> ProductId {
    match raw.parse() {
        Ok(id) => id,
        Err(never) => match never {},
    }
}

fn print_product(p: &Product) {
    println!("id={} price={} name={:?}", p.id, p.price, p.name);
}
