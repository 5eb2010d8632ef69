use hotsort::IngestionController;

fn main() {
    // Create a controller with the default rebalance threshold of 10:
    // a value seen more than 10 times in one batch is rebalanced
    let mut sorter: IngestionController<u32> = IngestionController::new();

    // Bulk load, no rebalancing
    sorter.load(vec![5, 3, 8, 3, 3]);

    // A batch with one hot value
    let mut batch = vec![3; 12];
    batch.extend([1, 9, 7]);
    let outcome = sorter.insert_batch(&batch);

    println!("Sorted output:");
    println!("{:?}", sorter.output());

    // The three 3's from the initial load were replaced by the batch count
    println!(
        "\nRebalanced {} hot value(s): removed {}, reinserted {}",
        outcome.hot_values, outcome.removed, outcome.reinserted
    );
    println!("Count of 3: {}", sorter.container().count_of(&3));

    // Streamed events are batches of one
    for value in [4, 2, 6] {
        sorter.stream_event(value);
    }
    println!("\nAfter streaming: {:?}", sorter.output());
}
