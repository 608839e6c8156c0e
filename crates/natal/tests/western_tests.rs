use natal::houses::HouseCusps;
use natal::western::{degree_in_sign, house_of, house_of_longitudes, sign_of, Sign};
use natal::ChartError;

#[test]
fn test_sign_of_boundaries() {
    assert_eq!(sign_of(0.0), Sign::Aries);
    assert_eq!(sign_of(29.999), Sign::Aries);
    assert_eq!(sign_of(30.0), Sign::Taurus);
    assert_eq!(sign_of(270.0), Sign::Capricorn);
    assert_eq!(sign_of(360.0), Sign::Aries);
}

#[test]
fn test_sign_of_is_periodic() {
    for i in 0..1440 {
        let lon = i as f64 * 0.25;
        assert_eq!(sign_of(lon), sign_of(lon + 360.0), "{lon}");
        assert_eq!(sign_of(lon), sign_of(lon - 360.0), "{lon}");
    }
}

#[test]
fn test_every_sign_in_order() {
    for (i, sign) in Sign::ALL.iter().enumerate() {
        assert_eq!(sign_of(i as f64 * 30.0 + 15.0), *sign);
        assert_eq!(sign.index(), i);
    }
    assert!((degree_in_sign(275.25) - 5.25).abs() < 1e-9);
}

#[test]
fn test_house_of_wrapping_interval() {
    // cusp 12 at 350, cusp 1 at 10: the twelfth house spans 0 Aries
    let raw = [10.0, 40.0, 70.0, 100.0, 130.0, 160.0, 190.0, 220.0, 250.0, 280.0, 310.0, 350.0];
    let cusps = HouseCusps::new(raw).unwrap();
    assert_eq!(house_of(355.0, &cusps), 12);
    assert_eq!(house_of(0.0, &cusps), 12);
    assert_eq!(house_of(9.999, &cusps), 12);
    assert_eq!(house_of(10.0, &cusps), 1);
    assert_eq!(house_of(349.999, &cusps), 11);
    for (i, lon) in raw.iter().enumerate() {
        assert_eq!(house_of(*lon, &cusps) as usize, i + 1);
    }
}

#[test]
fn test_house_of_rejects_unordered_cusps() {
    let raw = [10.0, 40.0, 70.0, 100.0, 130.0, 160.0, 190.0, 220.0, 250.0, 280.0, 5.0, 350.0];
    match house_of_longitudes(100.0, &raw) {
        Err(ChartError::HouseSystemDegenerate { system, .. }) => assert_eq!(system, "custom"),
        other => panic!("expected degenerate, got {other:?}"),
    }
}
