use std::fmt::Debug;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use tokio::task::JoinHandle;

use foodhub::api::models::OrderStatus;
use foodhub::api::{HttpFoodApi, SharedApi};
use foodhub::config::Config;
use foodhub::flavor::Flavor;
use foodhub::logging::init_tracing;
use foodhub::session::{Session, SessionStore};
use foodhub::ui::auth::{SignInModel, SignUpModel};
use foodhub::ui::customer::{HomeModel, OrderDetailsModel, OrderListModel, RestaurantDetailsModel};
use foodhub::ui::notifications::NotificationsModel;
use foodhub::ui::restaurant::{
    MenuModel, RestaurantOrderDetailsModel, RestaurantOrdersModel, RestaurantProfileModel,
};
use foodhub::ui::rider::{DeliveriesModel, DeliveryTab};
use foodhub::ui::screen::{Payload, ScreenState};

#[derive(Parser, Debug)]
#[command(name = "foodhub", version, about = "FoodHub delivery client")]
struct Cli {
    /// Config file (default: ~/.config/foodhub/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Override `api.base_url`
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Override `app.flavor`
    #[arg(long, global = true, value_enum)]
    flavor: Option<Flavor>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Sign in and store the session token
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Create an account and store the session token
    Signup {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Forget the stored session token
    Logout,
    /// Categories and restaurants near a location
    Restaurants {
        #[arg(long, allow_hyphen_values = true)]
        lat: f64,
        #[arg(long, allow_hyphen_values = true)]
        lon: f64,
    },
    /// Menu of a restaurant (owners default to their own)
    Menu { restaurant_id: Option<String> },
    /// Customer orders, or restaurant orders filtered by status
    Orders {
        #[arg(long, value_parser = parse_status)]
        status: Option<OrderStatus>,
    },
    /// One order; owners may change its status
    Order {
        order_id: String,
        #[arg(long, value_parser = parse_status)]
        set_status: Option<OrderStatus>,
    },
    /// Notification inbox
    Notifications,
    /// Rider deliveries
    Deliveries {
        /// Show accepted deliveries instead of available ones
        #[arg(long)]
        active: bool,
        #[arg(long, conflicts_with_all = ["reject", "active"])]
        accept: Option<String>,
        #[arg(long, conflicts_with = "active")]
        reject: Option<String>,
    },
}

fn parse_status(raw: &str) -> Result<OrderStatus, String> {
    OrderStatus::parse(raw).ok_or_else(|| {
        let names: Vec<_> = OrderStatus::ALL.iter().map(|s| s.as_str()).collect();
        format!("unknown status '{}', expected one of {}", raw, names.join(", "))
    })
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    if let Some(base_url) = cli.base_url {
        config.api.base_url = base_url;
        config.validate()?;
    }
    if let Some(flavor) = cli.flavor {
        config.app.flavor = flavor;
    }

    let session = if config.session.persist {
        let path = config
            .session
            .path
            .clone()
            .unwrap_or_else(SessionStore::default_path);
        Session::restore(SessionStore::new(path)).context("Failed to restore session")?
    } else {
        Session::new()
    };

    let api: SharedApi = Arc::new(HttpFoodApi::new(&config.api, session.clone())?);
    tracing::debug!(flavor = %config.app.flavor, base_url = %config.api.base_url, "Starting");

    if !run(cli.command, api, session, config.app.flavor).await? {
        std::process::exit(1);
    }
    Ok(())
}

async fn run(
    command: Command,
    api: SharedApi,
    session: Session,
    flavor: Flavor,
) -> anyhow::Result<bool> {
    match command {
        Command::Login { email, password } => {
            let model = SignInModel::new(api, session, flavor);
            model.on_email_change(email);
            model.on_password_change(password);
            settle(model.submit(), || model.state()).await
        }
        Command::Signup {
            name,
            email,
            password,
        } => {
            let model = SignUpModel::new(api, session, flavor);
            model.on_name_change(name);
            model.on_email_change(email);
            model.on_password_change(password);
            settle(model.submit(), || model.state()).await
        }
        Command::Logout => {
            session.sign_out().context("Failed to clear session")?;
            println!("Signed out");
            Ok(true)
        }
        Command::Restaurants { lat, lon } => {
            let model = HomeModel::new(api);
            settle(model.load(lat, lon), || model.state()).await
        }
        Command::Menu { restaurant_id } => {
            if flavor != Flavor::Restaurant {
                let Some(id) = restaurant_id else {
                    bail!("menu needs a restaurant id");
                };
                let model = RestaurantDetailsModel::new(api, id);
                return settle(model.load(), || model.state()).await;
            }

            let id = match restaurant_id {
                Some(id) => id,
                None => {
                    let profile = RestaurantProfileModel::new(SharedApi::clone(&api));
                    profile.load().await.context("Screen task failed")?;
                    match profile.state() {
                        ScreenState::Success(restaurant) => restaurant.id,
                        other => return Ok(report(&other)),
                    }
                }
            };
            let model = MenuModel::new(api, id);
            settle(model.load(), || model.state()).await
        }
        Command::Orders { status } => {
            if flavor == Flavor::Restaurant {
                let model = RestaurantOrdersModel::new(api);
                let status = status.unwrap_or(OrderStatus::Pending);
                settle(model.fetch_by_status(status), || model.state()).await
            } else {
                let model = OrderListModel::new(api);
                settle(model.load(), || model.state()).await
            }
        }
        Command::Order {
            order_id,
            set_status,
        } => match (flavor, set_status) {
            (Flavor::Restaurant, Some(status)) => {
                let model = RestaurantOrderDetailsModel::new(api, order_id);
                settle(model.set_status(status), || model.state()).await
            }
            (_, Some(_)) => bail!("--set-status needs --flavor restaurant"),
            (_, None) => {
                let model = OrderDetailsModel::new(api, order_id);
                settle(model.load(), || model.state()).await
            }
        },
        Command::Notifications => {
            let model = NotificationsModel::new(api);
            settle(model.load(), || model.state()).await
        }
        Command::Deliveries {
            active,
            accept,
            reject,
        } => {
            if flavor != Flavor::Rider {
                bail!("deliveries needs --flavor rider");
            }
            let model = DeliveriesModel::new(api);
            let task = match (accept, reject) {
                (Some(id), _) => model.accept(id),
                (None, Some(id)) => model.reject(id),
                (None, None) if active => model.fetch(DeliveryTab::Active),
                (None, None) => model.fetch(DeliveryTab::Available),
            };
            settle(task, || model.state()).await
        }
    }
}

async fn settle<T: Payload + Debug>(
    task: JoinHandle<()>,
    state: impl Fn() -> ScreenState<T>,
) -> anyhow::Result<bool> {
    task.await.context("Screen task failed")?;
    Ok(report(&state()))
}

fn report<T: Debug>(state: &ScreenState<T>) -> bool {
    match state {
        ScreenState::Success(payload) => {
            println!("{:#?}", payload);
            true
        }
        ScreenState::Error(error) => {
            eprintln!("{}: {}", error.title, error.description);
            eprintln!("  cause: {} (code {})", error.cause, error.code);
            false
        }
        other => {
            eprintln!("Unexpected state: {:?}", other);
            false
        }
    }
}
