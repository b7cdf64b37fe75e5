#[cfg(test)]
macro_rules! assert_approx_eq {
	($left: expr, $right: expr, $tol: expr) => ({
		match ($left, $right, $tol) {
			(left_val , right_val, tol_val) => {
				let delta = (left_val - right_val).abs();
				if !(delta <= tol_val) {
					panic!(
						"assertion failed: `(left ≈ right)` \
						(left: `{}`, right: `{}`) \
						with ∆={:1.1e} (allowed ∆={:e})",
						left_val , right_val, delta, tol_val
					)
				}
			}
		}
	});
	($left: expr, $right: expr) => (assert_approx_eq!(($left), ($right), 1e-15))
}



#[cfg(test)]
mod tests {
	use super::testing::*;

	#[test]
	fn quadrant_image_layout() {
		let img = quadrant_image(4, 6);
		assert_eq!(img.len(), 24);
		assert_eq!(img[0], [20, 30, 200]);
		assert_eq!(img[5][0] / 10, 22);
		assert_eq!(img[3 * 6][0] / 10, 3);
		assert_eq!(img[23][0] / 10, 24);
	}

	#[test]
	fn noise_image_is_reproducible() {
		assert_eq!(noise_image(5, 5, 42), noise_image(5, 5, 42));
		assert_ne!(noise_image(5, 5, 42), noise_image(5, 5, 43));
	}
}
