//! Seeds the catalog and the initial admin account. Idempotent: an already
//! populated catalog and an existing admin are left untouched.
//!
//! ```text
//! DATABASE_URL=postgres://... \
//! ADMIN_USERNAME=admin ADMIN_PASSWORD=... \
//! cargo run --bin seed
//! ```

use tracing_subscriber::EnvFilter;
use veggie_core::Role;
use veggie_db::{Database, DbConfig, NewUser, NewVegetable};
use veggie_server::auth::hash_password;

fn veg(
    name: &str,
    tamil: &str,
    tanglish: &str,
    category: &str,
    price_paise: i64,
) -> NewVegetable {
    NewVegetable {
        name: name.to_string(),
        tamil_name: tamil.to_string(),
        tanglish_name: Some(tanglish.to_string()),
        category: Some(category.to_string()),
        image_url: None,
        default_price_paise: price_paise,
    }
}

fn catalog() -> Vec<NewVegetable> {
    vec![
        veg("Tomato", "தக்காளி", "Thakkali", "vegetable", 4000),
        veg("Onion", "வெங்காயம்", "Vengayam", "vegetable", 5000),
        veg("Potato", "உருளைக்கிழங்கு", "Urulaikilangu", "vegetable", 4500),
        veg("Carrot", "கேரட்", "Carrot", "vegetable", 6000),
        veg("Beans", "பீன்ஸ்", "Beans", "vegetable", 8000),
        veg("Brinjal", "கத்தரிக்காய்", "Kathirikai", "vegetable", 4000),
        veg("Ladies Finger", "வெண்டைக்காய்", "Vendakkai", "vegetable", 6000),
        veg("Cabbage", "முட்டைக்கோஸ்", "Muttaikose", "vegetable", 3000),
        veg("Cauliflower", "காலிஃபிளவர்", "Cauliflower", "vegetable", 4000),
        veg("Drumstick", "முருங்கைக்காய்", "Murungaikai", "vegetable", 12000),
        veg("Bitter Gourd", "பாகற்காய்", "Pagarkai", "vegetable", 6000),
        veg("Bottle Gourd", "சுரைக்காய்", "Suraikai", "vegetable", 3500),
        veg("Snake Gourd", "புடலங்காய்", "Pudalangai", "vegetable", 4000),
        veg("Ridge Gourd", "பீர்க்கங்காய்", "Peerkangai", "vegetable", 5000),
        veg("Pumpkin", "பூசணிக்காய்", "Poosanikai", "vegetable", 3000),
        veg("Ash Gourd", "நீர்ப்பூசணி", "Neer Poosani", "vegetable", 3000),
        veg("Cucumber", "வெள்ளரிக்காய்", "Vellarikai", "vegetable", 3500),
        veg("Radish", "முள்ளங்கி", "Mullangi", "vegetable", 4000),
        veg("Beetroot", "பீட்ரூட்", "Beetroot", "vegetable", 5000),
        veg("Green Chilli", "பச்சை மிளகாய்", "Pachai Milagai", "spice", 8000),
        veg("Ginger", "இஞ்சி", "Inji", "spice", 16000),
        veg("Garlic", "பூண்டு", "Poondu", "spice", 20000),
        veg("Coriander", "கொத்தமல்லி", "Kothamalli", "greens", 2000),
        veg("Mint", "புதினா", "Pudina", "greens", 2000),
        veg("Curry Leaves", "கறிவேப்பிலை", "Kariveppilai", "greens", 2000),
        veg("Spinach", "பசலைக்கீரை", "Pasalai Keerai", "greens", 3000),
        veg("Amaranth Leaves", "அரைக்கீரை", "Arai Keerai", "greens", 3000),
        veg("Banana Flower", "வாழைப்பூ", "Vazhaipoo", "vegetable", 4000),
        veg("Raw Banana", "வாழைக்காய்", "Vazhakkai", "vegetable", 3500),
        veg("Sweet Corn", "இனிப்பு சோளம்", "Sweet Cholam", "vegetable", 5000),
        veg("Capsicum", "குடைமிளகாய்", "Kudai Milagai", "vegetable", 8000),
        veg("Peas", "பட்டாணி", "Pattani", "vegetable", 10000),
    ]
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let database_url = match std::env::var("DATABASE_URL") {
        Ok(url) => url,
        Err(_) => {
            tracing::error!("DATABASE_URL is required");
            std::process::exit(1);
        }
    };

    if let Err(e) = seed(&database_url).await {
        tracing::error!(error = %e, "seeding failed");
        std::process::exit(1);
    }
}

async fn seed(database_url: &str) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::connect(&DbConfig::new(database_url)).await?;

    let vegetables = db.vegetables();
    if vegetables.count().await? == 0 {
        let entries = catalog();
        for entry in &entries {
            vegetables.insert(entry).await?;
        }
        tracing::info!(count = entries.len(), "catalog seeded");
    } else {
        tracing::info!("catalog already populated, skipping");
    }

    let users = db.users();
    let admin_username =
        std::env::var("ADMIN_USERNAME").unwrap_or_else(|_| "admin".to_string());
    if users.find_by_username(&admin_username).await?.is_none() {
        let admin_password = std::env::var("ADMIN_PASSWORD")
            .map_err(|_| "ADMIN_PASSWORD is required to create the admin account")?;
        let admin = NewUser {
            username: admin_username,
            password_hash: hash_password(&admin_password)
                .map_err(|e| format!("password hashing failed: {e}"))?,
            role: Role::Admin,
            shop_name: None,
            mobile_enc: None,
        };
        let user = users.create(&admin).await?;
        tracing::info!(username = %user.username, "admin account created");
    } else {
        tracing::info!(username = %admin_username, "admin account already exists, skipping");
    }

    db.close().await;
    Ok(())
}
