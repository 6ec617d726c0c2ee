use anyhow::{bail, Context, Result};
use clap::Subcommand;
use rom_client::fetch_orders;
use rom_menu::ProductCatalog;
use rom_orders::{DraftOrder, Order, OrderStatus, OrderStatusController};

use super::{print_origin, Ctx};

#[derive(Subcommand)]
pub enum OrdersCmd {
    /// List orders
    List,

    /// Show the status changes available for an order
    Options {
        #[arg(long)]
        id: i64,
    },

    /// Move an order to a new status
    Advance {
        #[arg(long)]
        id: i64,

        /// Target status (pending | confirmed | preparing | ready | delivered | cancelled)
        #[arg(long)]
        to: String,
    },

    /// Cancel an order
    Cancel {
        #[arg(long)]
        id: i64,
    },

    /// Build an order from menu items and submit it
    New {
        /// "<product name>" or "<product name> xN"; repeat per item
        #[arg(long = "item", required = true)]
        items: Vec<String>,
    },
}

pub async fn run(config_paths: &[String], cmd: OrdersCmd) -> Result<()> {
    match cmd {
        OrdersCmd::List => {
            let ctx = Ctx::load(config_paths)?;
            let client = ctx.session.client(&ctx.api);
            let fetched = fetch_orders(&client, ctx.settings.degraded_mode).await?;
            print_origin(&fetched.origin);
            for o in &fetched.value {
                print_order(o);
            }
            println!("count={}", fetched.value.len());
        }
        OrdersCmd::Options { id } => {
            let ctx = Ctx::load(config_paths)?;
            let mut controller = OrderStatusController::new(ctx.session.client(&ctx.api));
            controller.refresh().await?;
            let current = controller
                .order(id)
                .map(|o| o.status.clone())
                .with_context(|| format!("order #{id} not found"))?;
            let choices = controller.request_transition(id, &current)?;
            println!("order_id={} status={}", choices.order_id, choices.current);
            for t in choices.options {
                println!("option status={} label={}", t.status, t.label);
            }
        }
        OrdersCmd::Advance { id, to } => {
            let target = OrderStatus::parse(&to.trim().to_ascii_lowercase());
            let ctx = Ctx::load(config_paths)?;
            let mut controller = OrderStatusController::new(ctx.session.client(&ctx.api));
            controller.refresh().await?;
            let order = controller.apply_transition(id, target).await?;
            print!("updated=true ");
            print_order(order);
        }
        OrdersCmd::Cancel { id } => {
            let ctx = Ctx::load(config_paths)?;
            let mut controller = OrderStatusController::new(ctx.session.client(&ctx.api));
            controller.refresh().await?;
            let order = controller.cancel(id).await?;
            print!("cancelled=true ");
            print_order(order);
        }
        OrdersCmd::New { items } => {
            let wanted = items
                .iter()
                .map(|raw| parse_item_arg(raw).map(|(name, qty)| (raw.trim(), name, qty)))
                .collect::<Result<Vec<_>>>()?;

            let ctx = Ctx::load(config_paths)?;
            let client = ctx.session.client(&ctx.api);
            let mut catalog = ProductCatalog::new(client.clone());
            catalog.refresh().await?;

            let mut draft = DraftOrder::new();
            for (raw, name, qty) in &wanted {
                // Menu names may themselves end in "x<digits>".
                let (product, qty) = match catalog.find_by_name(name) {
                    Some(p) => (p, *qty),
                    None => catalog
                        .find_by_name(raw)
                        .map(|p| (p, 1))
                        .with_context(|| format!("no product named {name:?} on the menu"))?,
                };
                let line_id = draft.add_product(product)?;
                draft.adjust_quantity(&line_id, i64::from(qty) - 1)?;
            }

            for line in draft.lines() {
                println!(
                    "line name={:?} qty={} unit={} total={}",
                    line.product_name, line.quantity, line.unit_price, line.total
                );
            }
            println!("total={}", draft.total());

            let controller = OrderStatusController::new(client);
            let user_id = ctx.session.user().map(|u| u.id);
            let created = controller.submit(&draft, user_id).await?;
            println!("created=true order_id={}", created.id);
        }
    }
    Ok(())
}

/// `"Burger x2"` -> ("Burger", 2); `"Burger"` -> ("Burger", 1).
///
/// The quantity is a separate last word, `x2` or `*2`. Anything else stays
/// part of the name ("Box 12", "Combo X1").
fn parse_item_arg(raw: &str) -> Result<(String, u32)> {
    let raw = raw.trim();
    if raw.is_empty() {
        bail!("empty --item");
    }
    if let Some((name, last)) = raw.rsplit_once(char::is_whitespace) {
        let qty = last
            .strip_prefix(['x', '*'])
            .and_then(|digits| digits.parse::<u32>().ok());
        let name = name.trim_end();
        if let (Some(qty), false) = (qty, name.is_empty()) {
            if qty == 0 {
                bail!("item {raw:?}: quantity must be at least 1");
            }
            return Ok((name.to_string(), qty));
        }
    }
    Ok((raw.to_string(), 1))
}

fn print_order(o: &Order) {
    println!(
        "id={} status={} label={} total={} updated_at={}",
        o.id,
        o.status,
        o.status.label(),
        o.total_amount,
        o.updated_at.to_rfc3339()
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn item_arg_quantity_suffix() {
        assert_eq!(parse_item_arg("Burger x2").unwrap(), ("Burger".into(), 2));
        assert_eq!(parse_item_arg("Soda *3").unwrap(), ("Soda".into(), 3));
        assert_eq!(parse_item_arg("Box 12 x3").unwrap(), ("Box 12".into(), 3));
        assert_eq!(parse_item_arg(" Batata Frita ").unwrap(), ("Batata Frita".into(), 1));
    }

    #[test]
    fn item_arg_names_containing_x_are_kept_whole() {
        assert_eq!(parse_item_arg("Box").unwrap(), ("Box".into(), 1));
        assert_eq!(parse_item_arg("Xis Salada").unwrap(), ("Xis Salada".into(), 1));
        assert_eq!(parse_item_arg("Box 12").unwrap(), ("Box 12".into(), 1));
        assert_eq!(parse_item_arg("Combo X1").unwrap(), ("Combo X1".into(), 1));
        assert_eq!(parse_item_arg("Pizza 2x").unwrap(), ("Pizza 2x".into(), 1));
    }

    #[test]
    fn item_arg_rejects_zero_and_empty() {
        assert!(parse_item_arg("Burger x0").is_err());
        assert!(parse_item_arg("  ").is_err());
    }
}
