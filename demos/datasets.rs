use std::time::Instant;

use hotsort::datagen::DatasetGenerator;
use hotsort::IngestionController;

fn main() {
    let seed = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or(0);

    let catalog = DatasetGenerator::from_seed(seed).catalog();

    println!("Each dataset: first half bulk loaded, second half ingested as one batch.");
    println!("A mismatch is expected when the second half has a value more than 10 times:");
    println!("rebalancing keeps only that batch's copies, dropping the ones loaded earlier.\n");

    // Load the first half of each dataset, then ingest the rest as one batch
    for (name, data) in catalog {
        let (initial, incoming) = data.split_at(data.len() / 2);
        let mut sorter = IngestionController::new();

        let start = Instant::now();
        sorter.load(initial.to_vec());
        let outcome = sorter.insert_batch(incoming);
        let duration = start.elapsed();

        let mut expected = data.clone();
        expected.sort_unstable();
        let matches = sorter.output() == expected.as_slice();

        println!(
            "{:<22} len {:>5} -> {:>5}  matches reference sort: {:<5}  hot values: {:>2}  {:?}",
            name,
            data.len(),
            sorter.len(),
            matches,
            outcome.hot_values,
            duration
        );
    }
}
