use chrono::NaiveDate;
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use natal::chart::{ChartAssembler, ChartSettings};
use natal::ephemeris::{AnalyticEphemeris, EphemerisProvider, GeoPosition};
use natal::houses::{compute_houses, HouseSystem};
use natal::points::Body;
use natal::time;

fn bench_position_of(c: &mut Criterion) {
    let eph = AnalyticEphemeris::new();
    let instant = time::resolve(NaiveDate::from_ymd_opt(1990, 1, 1).unwrap(), "00:00", 540).unwrap();

    c.bench_function("position_of_all_bodies", |b| {
        b.iter(|| {
            for body in Body::ALL {
                let _ = eph.position_of(black_box(body), black_box(&instant));
            }
        })
    });
}

fn bench_houses(c: &mut Criterion) {
    let instant = time::resolve(NaiveDate::from_ymd_opt(1990, 1, 1).unwrap(), "00:00", 540).unwrap();
    let geo = GeoPosition::new(40.7128, -74.0060).unwrap();

    for system in [HouseSystem::Placidus, HouseSystem::Regiomontanus, HouseSystem::WholeSign] {
        c.bench_function(&format!("houses_{}", system.id()), |b| {
            b.iter(|| compute_houses(black_box(&instant), black_box(&geo), system))
        });
    }
}

fn bench_assemble(c: &mut Criterion) {
    let eph = AnalyticEphemeris::new();
    let instant = time::resolve(NaiveDate::from_ymd_opt(1990, 1, 1).unwrap(), "00:00", 540).unwrap();
    let geo = GeoPosition::new(35.68, 139.77).unwrap();
    let assembler = ChartAssembler::new(&eph, ChartSettings::default());

    c.bench_function("assemble_chart", |b| {
        b.iter(|| assembler.assemble(black_box(&instant), black_box(&geo)))
    });
}

criterion_group!(benches, bench_position_of, bench_houses, bench_assemble);
criterion_main!(benches);
