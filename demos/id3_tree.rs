use quarry::tree::{discretize, rank_attributes, root_attribute, Id3, RawRow, RawValue};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // RUST_LOG=quarry=debug traces every split.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("quarry=info")),
        )
        .init();

    // Cosmetics purchases; Age is numeric and gets median-bucketed.
    let table: [(f64, &str, &str, &str, &str); 10] = [
        (18.0, "High", "Female", "Single", "Yes"),
        (20.0, "Low", "Female", "Married", "Yes"),
        (24.0, "Medium", "Male", "Single", "No"),
        (33.0, "Medium", "Female", "Married", "Yes"),
        (35.0, "Low", "Male", "Married", "No"),
        (38.0, "High", "Male", "Single", "No"),
        (45.0, "High", "Female", "Single", "Yes"),
        (52.0, "Medium", "Male", "Married", "No"),
        (19.0, "Medium", "Male", "Single", "Yes"),
        (60.0, "Low", "Female", "Single", "No"),
    ];
    let raw: Vec<RawRow> = table
        .iter()
        .map(|&(age, income, gender, status, buys)| {
            [
                ("Age", RawValue::Number(age)),
                ("Income", income.into()),
                ("Gender", gender.into()),
                ("Ms", status.into()),
                ("Buys", buys.into()),
            ]
            .into_iter()
            .map(|(k, v)| (k.to_string(), v))
            .collect()
        })
        .collect();

    let data = discretize(&raw)?;
    for (column, median) in &data.medians {
        println!("discretized '{column}' at median {median}");
    }

    let attributes = ["Age", "Income", "Gender", "Ms"];
    for split in rank_attributes(&data.rows, &attributes, "Buys")? {
        println!("attribute {}:", split.attribute);
        for p in &split.partitions {
            println!("  '{}': count={}, entropy={:.6}", p.value, p.count, p.entropy);
        }
        println!("  => information gain = {:.6}", split.gain);
    }
    if let Some((root, gain)) = root_attribute(&data.rows, &attributes, "Buys")? {
        println!("root: {root} (gain {gain:.6})");
    }

    let tree = Id3::new("Buys").fit(&data.rows, &attributes)?;
    println!("\n{tree}");

    // Age < 21 falls in the lower bucket.
    let young = format!("<={}", data.medians["Age"]);
    let query: quarry::Row = [
        ("Age", young.as_str()),
        ("Income", "Low"),
        ("Gender", "Female"),
        ("Ms", "Married"),
    ]
    .iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect();
    match tree.predict(&query) {
        Ok(class) => println!("prediction for {query:?}: {class}"),
        Err(e) => println!("cannot predict {query:?}: {e}"),
    }

    Ok(())
}
