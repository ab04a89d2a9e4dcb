use criterion::{black_box, criterion_group, criterion_main, Criterion};
use labyrinth::{
    cells::{Cartesian2DCoordinate, CompassPrimary},
    generators,
    grids::{large_rect_grid, medium_rect_grid, small_rect_grid},
    units::{ColumnLength, RowLength},
};
use rand::SeedableRng;
use rand_xorshift::XorShiftRng;

fn bench_grid_construction(c: &mut Criterion) {
    c.bench_function("grid_11_u8", |b| {
        b.iter(|| small_rect_grid(RowLength(11), ColumnLength(11)).unwrap())
    });
    c.bench_function("grid_11_u16", |b| {
        b.iter(|| medium_rect_grid(RowLength(11), ColumnLength(11)).unwrap())
    });
    c.bench_function("grid_128_u32", |b| {
        b.iter(|| large_rect_grid(RowLength(128), ColumnLength(128)).unwrap())
    });
    c.bench_function("grid_500_u32", |b| {
        b.iter(|| large_rect_grid(RowLength(500), ColumnLength(500)).unwrap())
    });
}

fn bench_index_to_gridcoordinate(c: &mut Criterion) {
    c.bench_function("index_to_gridcoordinate", |b| {
        b.iter(|| Cartesian2DCoordinate::from_row_major_index(black_box(93), RowLength(11)))
    });
}

fn bench_neighbours(c: &mut Criterion) {
    let g = large_rect_grid(RowLength(11), ColumnLength(11)).unwrap();
    let corner = Cartesian2DCoordinate::new(0, 0);
    let mid = Cartesian2DCoordinate::new(5, 5);

    c.bench_function("neighbours_corner_of_grid", |b| b.iter(|| g.neighbours(black_box(corner))));
    c.bench_function("neighbours_middle_of_grid", |b| b.iter(|| g.neighbours(black_box(mid))));
    c.bench_function("adjacent_cells_middle_of_grid",
                     |b| b.iter(|| g.adjacent_cells(black_box(mid))));
}

fn bench_wall_queries(c: &mut Criterion) {
    let mut g = large_rect_grid(RowLength(64), ColumnLength(64)).unwrap();
    generators::generate(&mut g, &mut XorShiftRng::seed_from_u64(7)).unwrap();
    let mid = Cartesian2DCoordinate::new(32, 32);

    c.bench_function("wall_state", |b| b.iter(|| g.wall_state(black_box(mid))));
    c.bench_function("can_traverse",
                     |b| b.iter(|| g.can_traverse(black_box(mid), CompassPrimary::East)));
    c.bench_function("cell_at_out_of_bounds", |b| b.iter(|| g.cell_at(black_box(64), -1)));
    c.bench_function("wall_markers_64", |b| b.iter(|| g.wall_markers().to_string()));
}

criterion_group!(
    benches,
    bench_grid_construction,
    bench_index_to_gridcoordinate,
    bench_neighbours,
    bench_wall_queries
);
criterion_main!(benches);
