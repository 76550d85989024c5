//! Performance benchmarks for FLYWAY

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use flyway::bird::Bird;
use flyway::{Config, Gender, Simulation};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

fn hazard_free_config() -> Config {
    let mut config = Config::default();
    config.timing.safe_mode_secs = 0.0;
    config.predation.catch_probability_base = 0.0;
    config.weather.storm_probability = 0.0;
    config
}

fn benchmark_tick(c: &mut Criterion) {
    let mut group = c.benchmark_group("simulation_tick");

    for population in [10usize, 100, 500].iter() {
        let mut sim = Simulation::new_with_seed(hazard_free_config(), 42);
        let mut rng = ChaCha8Rng::seed_from_u64(7);

        // Pad the founder pair up to the benchmark population.
        for i in 0..population.saturating_sub(sim.population()) {
            let gender = Gender::random(&mut rng);
            let bird = Bird::adult(1000 + i as u64, 500.0, 300.0, gender, &sim.config.birds, 1.0, &mut rng);
            sim.birds.push(bird);
        }

        // Warm up
        sim.run(10);

        group.bench_with_input(
            BenchmarkId::new("population", population),
            population,
            |b, _| {
                b.iter(|| {
                    sim.update();
                });
            },
        );
    }

    group.finish();
}

fn benchmark_predation_scan(c: &mut Criterion) {
    let mut config = Config::default();
    config.timing.safe_mode_secs = 0.0;
    let mut sim = Simulation::new_with_seed(config, 42);
    let mut rng = ChaCha8Rng::seed_from_u64(8);

    for i in 0..200 {
        let gender = Gender::random(&mut rng);
        let x = rng.gen_range(50.0..950.0);
        let y = rng.gen_range(50.0..550.0);
        let bird = Bird::adult(2000 + i as u64, x, y, gender, &sim.config.birds, 1.0, &mut rng);
        sim.birds.push(bird);
    }
    for _ in 0..10 {
        sim.add_predator();
    }

    c.bench_function("tick_with_predators", |b| {
        b.iter(|| {
            sim.update();
        });
    });
}

fn benchmark_snapshot(c: &mut Criterion) {
    let mut sim = Simulation::new_with_seed(hazard_free_config(), 42);
    let mut rng = ChaCha8Rng::seed_from_u64(9);

    for i in 0..500 {
        let gender = Gender::random(&mut rng);
        let bird = Bird::adult(3000 + i as u64, 500.0, 300.0, gender, &sim.config.birds, 1.0, &mut rng);
        sim.birds.push(bird);
    }

    c.bench_function("snapshot_500_birds", |b| {
        b.iter(|| black_box(sim.snapshot()));
    });
}

criterion_group!(benches, benchmark_tick, benchmark_predation_scan, benchmark_snapshot);
criterion_main!(benches);
