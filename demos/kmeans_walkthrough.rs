use quarry::cluster::{assign, distances_to_centroids, Kmeans};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // RUST_LOG=quarry=debug shows every iteration; reseeds log at warn.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("quarry=warn")),
        )
        .init();

    let names = ["P1", "P2", "P3", "P4", "P5", "P6", "P7", "P8"];
    let points: Vec<Vec<f64>> = vec![
        vec![2.0, 10.0],
        vec![2.0, 5.0],
        vec![8.0, 4.0],
        vec![5.0, 8.0],
        vec![7.0, 5.0],
        vec![6.0, 4.0],
        vec![1.0, 2.0],
        vec![4.0, 9.0],
    ];
    // m1 = P1, m2 = P4, m3 = P7
    let seeds = vec![points[0].clone(), points[3].clone(), points[6].clone()];

    let labels = assign(&points, &seeds)?;
    println!("assignment after one step:");
    for (i, name) in names.iter().enumerate() {
        let d = distances_to_centroids(&points[i], &seeds)?;
        println!(
            "  {name}: cluster {} (m1 {:.6}, m2 {:.6}, m3 {:.6})",
            labels[i] + 1,
            d[0],
            d[1],
            d[2]
        );
    }

    let fit = Kmeans::new(3)
        .with_iterations(1)
        .with_initial_centroids(seeds)
        .fit(&points)?;
    println!("updated centroids:");
    for (c, centroid) in fit.centroids().iter().enumerate() {
        let members: Vec<&str> = fit.members(c).into_iter().map(|i| names[i]).collect();
        println!(
            "  m{} = ({:.6}, {:.6})  members {:?}",
            c + 1,
            centroid[0],
            centroid[1],
            members
        );
    }

    let settled = Kmeans::new(3).with_iterations(10).with_seed(42).fit(&points)?;
    println!("after 10 iterations from a random start:");
    for (c, centroid) in settled.centroids().iter().enumerate() {
        let formatted: Vec<String> = centroid.iter().map(|v| format!("{v:.4}")).collect();
        println!("  cluster {c} mean: [{}]", formatted.join(", "));
    }
    println!("inertia={:.4} reseeds={}", settled.inertia(), settled.degenerate().len());

    Ok(())
}
