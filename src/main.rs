use chrono::Local;
use dotenvy::dotenv;
use order_repository::application::order_report::OrderReport;
use order_repository::application::statistics::Summary;
use order_repository::{provision_schema, Config, DieselOrderRepository, LineItem, Order, OrderRepository};

fn sample_orders() -> Vec<Order> {
    let today = Local::now().date_naive();
    vec![
        Order::new(
            1,
            today,
            vec![
                LineItem::new("computer", 3500, 5),
                LineItem::new("mouse", 35, 6),
                LineItem::new("keyboard", 32, 5),
            ],
        ),
        Order::new(
            2,
            today,
            vec![
                LineItem::new("laptop", 4200, 2),
                LineItem::new("microphone", 69, 3),
                LineItem::new("camera", 49, 4),
                LineItem::new("pendrive", 35, 10),
                LineItem::new("speakers", 550, 5),
            ],
        ),
        Order::new(
            3,
            today,
            vec![
                LineItem::new("powerbank", 90, 10),
                LineItem::new("laser printer", 650, 3),
                LineItem::new("notebook", 3200, 5),
                LineItem::new("tablet", 350, 10),
                LineItem::new("laptop", 2500, 3),
            ],
        ),
    ]
}

fn revised_first_order() -> Order {
    Order::new(
        1,
        Local::now().date_naive(),
        vec![
            LineItem::new("computer", 4500, 2),
            LineItem::new("mouse", 46, 3),
            LineItem::new("printer", 540, 4),
            LineItem::new("keyboard", 43, 2),
            LineItem::new("notebook", 530, 5),
            LineItem::new("camera", 1800, 2),
        ],
    )
}

fn save(database_url: &str, order: &Order) -> Result<(), Box<dyn std::error::Error>> {
    // `update` is a full replace, so rerunning the demo rewrites the same orders.
    DieselOrderRepository::scoped(database_url, |repo| {
        repo.update(order)?;
        repo.complete();
        Ok(())
    })?;
    let stored = DieselOrderRepository::scoped(database_url, |repo| repo.get_by_id(order.id()))?;
    if let Some(stored) = stored {
        println!("{}", serde_json::to_string_pretty(&stored)?);
    }
    Ok(())
}

fn log_summary(label: &str, summary: Option<Summary>) {
    match summary {
        Some(s) => log::info!(
            "{}: n={} min={:.2} max={:.2} mean={:.4} variance={:.4} skew={:.4} kurtosis={:.4}",
            label,
            s.count,
            s.min,
            s.max,
            s.mean,
            s.variance,
            s.skewness,
            s.kurtosis
        ),
        None => log::info!("{}: no data", label),
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let config = Config::from_env();
    provision_schema(&config.database_url)?;

    for order in sample_orders() {
        save(&config.database_url, &order)?;
    }
    save(&config.database_url, &revised_first_order())?;

    let mut report = OrderReport::new(DieselOrderRepository::open(&config.database_url)?);
    log_summary("line amounts of order 1", report.summarize_lines(1)?);
    log_summary("totals of orders 1-3", report.summarize_totals(&[1, 2, 3])?);
    report.into_inner().close()?;

    Ok(())
}
