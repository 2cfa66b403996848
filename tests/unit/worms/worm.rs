use super::*;
use rand::{SeedableRng, rngs::StdRng};

fn world(w: u32, h: u32) -> WorldConfig {
    WorldConfig {
        width: w,
        height: h,
        ..WorldConfig::default()
    }
}

#[test]
fn reflections_mirror_headings() {
    use Direction::*;
    let x: Vec<_> = Direction::ALL.iter().map(|d| d.reflect_x()).collect();
    assert_eq!(x, [N, NW, W, SW, S, SE, E, NE]);
    let y: Vec<_> = Direction::ALL.iter().map(|d| d.reflect_y()).collect();
    assert_eq!(y, [S, SE, E, NE, N, NW, W, SW]);
    for d in Direction::ALL {
        assert_eq!(d.reflect_x().dx(), -d.dx());
        assert_eq!(d.reflect_y().dy(), -d.dy());
    }
}

#[test]
fn turn_wraps_both_ways() {
    assert_eq!(Direction::NW.turn(1), Direction::N);
    assert_eq!(Direction::N.turn(-1), Direction::NW);
    assert_eq!(Direction::E.turn(0), Direction::E);
    assert_eq!(Direction::S.turn(12), Direction::N);
}

#[test]
fn advance_steps_by_heading() {
    assert_eq!(Direction::SE.advance(Point::new(2, 2)), Point::new(3, 3));
    assert_eq!(Direction::N.advance(Point::new(2, 2)), Point::new(2, 1));
}

#[test]
fn worm_grows_to_length_then_keeps_it() {
    let w = world(100, 100);
    let mut worm = Worm::new(Point::new(50, 50), 3, Direction::E);
    worm.advance(&w);
    worm.advance(&w);
    assert_eq!(
        worm.points(),
        [Point::new(50, 50), Point::new(51, 50), Point::new(52, 50)]
    );
    worm.advance(&w);
    assert_eq!(
        worm.points(),
        [Point::new(51, 50), Point::new(52, 50), Point::new(53, 50)]
    );
    assert_eq!(worm.head(), Point::new(53, 50));
}

#[test]
fn worm_bounces_off_walls() {
    let w = world(4, 4);
    let mut worm = Worm::new(Point::new(3, 0), 2, Direction::NE);
    worm.advance(&w);
    assert_eq!(worm.direction(), Direction::SW);
    assert_eq!(worm.head(), Point::new(2, 1));

    let mut worm = Worm::new(Point::new(0, 2), 2, Direction::W);
    worm.advance(&w);
    assert_eq!(worm.direction(), Direction::E);
    assert_eq!(worm.head(), Point::new(1, 2));
}

#[test]
fn random_worms_stay_in_the_world() {
    let w = world(8, 5);
    let mut rng = StdRng::seed_from_u64(42);
    for _ in 0..20 {
        let mut worm = Worm::random(&w, &mut rng);
        let len = worm.points().len();
        assert!((w.min_len..=w.max_len).contains(&len));
        for _ in 0..200 {
            worm.advance(&w);
            worm.turn(rng.gen_range(-1..=1));
            assert!(worm.points().iter().all(|&p| w.contains(p)));
            assert_eq!(worm.points().len(), len);
        }
    }
}

#[test]
fn colours_are_translucent() {
    let mut rng = StdRng::seed_from_u64(3);
    for _ in 0..50 {
        let c = random_colour(&mut rng);
        assert_eq!(c.a, 0x44);
        assert!(c.r <= c.a && c.g <= c.a && c.b <= c.a);
    }
}
