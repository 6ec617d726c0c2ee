use anyhow::Result;
use rom_client::fetch_dashboard_stats;

use super::{print_origin, Ctx};

pub async fn run(config_paths: &[String]) -> Result<()> {
    let ctx = Ctx::load(config_paths)?;
    let client = ctx.session.client(&ctx.api);
    let stats = fetch_dashboard_stats(&client, ctx.settings.degraded_mode).await?;
    print_origin(&stats.origin);

    let s = &stats.value;
    println!("today_sales={} change={:+.1}%", s.today_sales, s.sales_change);
    println!("today_orders={} change={:+.1}%", s.today_orders, s.orders_change);
    println!("average_ticket={} change={:+.1}%", s.average_ticket, s.ticket_change);
    println!("total_sales={}", s.total_sales);
    println!("total_orders={}", s.total_orders);
    println!("cancelled_orders={}", s.cancelled_orders);
    Ok(())
}
