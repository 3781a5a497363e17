use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{ArrayRef, BooleanArray, Float64Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Uniform in `[lo, hi)`.
    fn range(&mut self, lo: f64, hi: f64) -> f64 {
        lo + (hi - lo) * self.next_f64()
    }
}

struct Product {
    id: i64,
    brand: &'static str,
    model: String,
    price: f64,
    rating: f64,
    in_stock: bool,
}

fn generate_products(rng: &mut SimpleRng) -> Vec<Product> {
    // (brand, model prefix, price range)
    let brands = [
        ("apple", "iPhone", (600.0, 1400.0)),
        ("samsung", "Galaxy", (300.0, 1200.0)),
        ("xiaomi", "Redmi", (150.0, 600.0)),
        ("google", "Pixel", (400.0, 1000.0)),
    ];

    let mut products = Vec::new();
    let mut id = 1;
    for (brand, prefix, (lo, hi)) in brands {
        for generation in 10..16 {
            products.push(Product {
                id,
                brand,
                model: format!("{prefix} {generation}"),
                price: (rng.range(lo, hi) / 10.0).round() * 10.0,
                rating: (rng.range(3.0, 5.0) * 10.0).round() / 10.0,
                in_stock: rng.next_f64() > 0.25,
            });
            id += 1;
        }
    }
    products
}

fn write_csv(path: &str, products: &[Product]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).context("creating CSV output")?;
    writer.write_record(["id", "brand", "model", "price", "rating", "in_stock"])?;
    for p in products {
        writer.write_record([
            p.id.to_string(),
            p.brand.to_string(),
            p.model.clone(),
            p.price.to_string(),
            p.rating.to_string(),
            p.in_stock.to_string(),
        ])?;
    }
    writer.flush()?;
    Ok(())
}

fn write_parquet(path: &str, products: &[Product]) -> Result<()> {
    let schema = Arc::new(Schema::new(vec![
        Field::new("id", DataType::Int64, false),
        Field::new("brand", DataType::Utf8, false),
        Field::new("model", DataType::Utf8, false),
        Field::new("price", DataType::Float64, false),
        Field::new("rating", DataType::Float64, false),
        Field::new("in_stock", DataType::Boolean, false),
    ]));

    let columns: Vec<ArrayRef> = vec![
        Arc::new(Int64Array::from_iter_values(products.iter().map(|p| p.id))),
        Arc::new(StringArray::from_iter_values(products.iter().map(|p| p.brand))),
        Arc::new(StringArray::from_iter_values(products.iter().map(|p| p.model.as_str()))),
        Arc::new(Float64Array::from_iter_values(products.iter().map(|p| p.price))),
        Arc::new(Float64Array::from_iter_values(products.iter().map(|p| p.rating))),
        Arc::new(BooleanArray::from(products.iter().map(|p| p.in_stock).collect::<Vec<_>>())),
    ];
    let batch = RecordBatch::try_new(schema.clone(), columns).context("building record batch")?;

    let file = std::fs::File::create(path).context("creating parquet output")?;
    let mut writer = ArrowWriter::try_new(file, schema, None).context("creating parquet writer")?;
    writer.write(&batch)?;
    writer.close()?;
    Ok(())
}

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(42);
    let products = generate_products(&mut rng);

    let csv_path = "sample_products.csv";
    let parquet_path = "sample_products.parquet";
    write_csv(csv_path, &products)?;
    write_parquet(parquet_path, &products)?;

    println!(
        "Wrote {} products to {csv_path} and {parquet_path}",
        products.len()
    );
    Ok(())
}
