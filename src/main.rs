use excavator::utils::errors::ExcavatorError;

fn main() -> Result<(), ExcavatorError> {
    tokio::runtime::Builder::new_multi_thread()
        // Cap the number of blocking threads - bcrypt verification lands there and heavy
        // login load can otherwise see explosions of threads.
        .max_blocking_threads(num_cpus::get())
        .enable_all()
        .build()
        .unwrap()
        .block_on(async {
            excavator::lib_main().await
        })
}
