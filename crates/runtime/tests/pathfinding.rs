use creature_core::{GridOracle, PathOracle, Position};
use creature_runtime::{AStarPathfinder, GridMap};

fn assert_valid(map: &GridMap, start: Position, goal: Position, path: &[Position]) {
    let mut previous = start;
    for &step in path {
        assert_eq!(previous.chebyshev(step), 1, "{previous} -> {step} is not one step");
        assert!(map.is_walkable(step), "{step} is a wall");
        if previous.is_diagonal_to(step) {
            let dx = step.x - previous.x;
            let dy = step.y - previous.y;
            assert!(map.is_walkable(previous.offset(dx, 0)), "corner cut at {previous}");
            assert!(map.is_walkable(previous.offset(0, dy)), "corner cut at {previous}");
        }
        previous = step;
    }
    assert_eq!(previous, goal);
}

#[test]
fn open_floor_paths_are_chebyshev_shortest() {
    let map = GridMap::open(12, 9);
    let astar = AStarPathfinder::new();
    let start = Position::new(3, 4);

    for x in 0..12 {
        for y in 0..9 {
            let goal = Position::new(x, y);
            let path = astar.find_path(&map, start, goal).expect("reachable");
            assert_eq!(path.len() as u32, start.chebyshev(goal));
            assert_valid(&map, start, goal, &path);
        }
    }
}

#[test]
fn walls_force_a_detour() {
    let map = GridMap::from_ascii(
        "\
.......
...#...
...#...
...#...
.......",
    )
    .expect("map");
    let start = Position::new(1, 2);
    let goal = Position::new(5, 2);

    let path = AStarPathfinder::new()
        .find_path(&map, start, goal)
        .expect("path around the wall");
    assert_valid(&map, start, goal, &path);
    // Up and over the wall's end without cutting either corner.
    assert_eq!(path.len(), 6);
}

#[test]
fn diagonal_between_two_walls_is_refused() {
    let map = GridMap::from_ascii(
        "\
.#.
#..
...",
    )
    .expect("map");
    let start = Position::new(0, 0);
    let goal = Position::new(1, 1);

    // Both orthogonal neighbours are walls, so the corner is sealed.
    assert_eq!(AStarPathfinder::new().find_path(&map, start, goal), None);
}

#[test]
fn single_wall_corner_costs_an_extra_step() {
    let map = GridMap::from_ascii(
        "\
.#.
...",
    )
    .expect("map");
    let start = Position::new(0, 0);
    let goal = Position::new(1, 1);

    let path = AStarPathfinder::new()
        .find_path(&map, start, goal)
        .expect("path");
    assert_eq!(path, vec![Position::new(0, 1), Position::new(1, 1)]);
}

#[test]
fn enclosed_goal_is_unreachable() {
    let map = GridMap::from_ascii(
        "\
.......
...###.
...#.#.
...###.",
    )
    .expect("map");
    let path = AStarPathfinder::new().find_path(&map, Position::new(0, 0), Position::new(4, 2));
    assert_eq!(path, None);
}

#[test]
fn off_map_goal_is_unreachable() {
    let map = GridMap::open(4, 4);
    assert!(!map.contains(Position::new(9, 9)));
    let path = AStarPathfinder::new().find_path(&map, Position::new(0, 0), Position::new(9, 9));
    assert_eq!(path, None);
}

#[test]
fn equal_searches_return_equal_paths() {
    let map = GridMap::open(10, 10).with_walls([Position::new(4, 4), Position::new(5, 5)]);
    let astar = AStarPathfinder::new();
    let first = astar.find_path(&map, Position::new(1, 1), Position::new(8, 8));
    let second = astar.find_path(&map, Position::new(1, 1), Position::new(8, 8));
    assert_eq!(first, second);
}
