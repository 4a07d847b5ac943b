use qfix_cordic::{sin, sqrt};
use qfix_num::Q16_16;

fn main() {
    let mut worst_sin = 0.0f64;
    let mut worst_sqrt = 0.0f64;

    for i in -6283..=6283 {
        let v = i as f64 * 0.001;
        let x = Q16_16::from_num(v).unwrap();
        let err = (sin(x).unwrap().to_f64() - x.to_f64().sin()).abs();
        if err > worst_sin {
            worst_sin = err;
        }
    }

    for i in 0..=40_000 {
        let v = i as f64 * 0.001;
        let x = Q16_16::from_num(v).unwrap();
        let err = (sqrt(x).unwrap().to_f64() - x.to_f64().sqrt()).abs();
        if err > worst_sqrt {
            worst_sqrt = err;
        }
    }

    println!("Q16_16 SIN_MAX_ERR  {:.3e}", worst_sin);
    println!("Q16_16 SQRT_MAX_ERR {:.3e}", worst_sqrt);
    println!("BOUND 2^-14         {:.3e}", (2f64).powi(-14));
}
