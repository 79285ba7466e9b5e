//! Benchmarking RINEX-2 / RINEX-3 observation conversion
extern crate criterion;
use criterion::{black_box, criterion_group, criterion_main, Criterion};

use rand::{rngs::StdRng, Rng, SeedableRng};
use std::str::FromStr;

use rinex_lnav::prelude::{
    Constellation, Duration, Epoch, HeaderV2, ObsDatum, ObsFileV2, ObsRecordV2, Observable,
    RinexConverter, ValidV2, SV,
};

fn file_v2(epochs: usize) -> ObsFileV2 {
    let mut rng = StdRng::seed_from_u64(0);
    let mut header = HeaderV2::default().with_observables(&[
        "C1", "P1", "L1", "D1", "S1", "P2", "L2", "D2", "S2", "C5", "L5",
    ]);
    header.valid |= ValidV2::REQUIRED;

    let svs: Vec<SV> = (1..=12)
        .map(|prn| SV::new(Constellation::GPS, prn))
        .chain((1..=8).map(|prn| SV::new(Constellation::Glonass, prn)))
        .chain((1..=8).map(|prn| SV::new(Constellation::Galileo, prn)))
        .collect();

    let t0 = Epoch::from_gpst_seconds(1.0E9);
    let records = (0..epochs)
        .map(|i| {
            let mut record = ObsRecordV2::new(t0 + Duration::from_seconds(30.0 * i as f64));
            for sv in svs.iter() {
                for observable in header.observables.iter() {
                    record = record.with_observation(
                        *sv,
                        observable.clone(),
                        ObsDatum::new(rng.gen_range(2.0E7..2.6E7)),
                    );
                }
            }
            record
        })
        .collect();

    ObsFileV2 { header, records }
}

fn benchmark(c: &mut Criterion) {
    let converter = RinexConverter::default();
    let v2 = file_v2(120);
    let (v3, _) = converter.file_to_v3(&v2).unwrap();

    let mut group = c.benchmark_group("conversion");

    group.bench_function("OBS/V2->V3", |b| {
        b.iter(|| {
            black_box(converter.file_to_v3(&v2).unwrap());
        })
    });

    group.bench_function("OBS/V3->V2", |b| {
        b.iter(|| {
            black_box(converter.file_to_v2(&v3).unwrap());
        })
    });

    let c1 = Observable::from_str("C1").unwrap();
    group.bench_function("codes/to_rinex3", |b| {
        b.iter(|| {
            black_box(converter.code_map().observable_to_rinex3(&c1).unwrap());
        })
    });

    group.finish();
}

criterion_group!(benches, benchmark);
criterion_main!(benches);
