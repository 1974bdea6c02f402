use crate::utils::errors::{ForecastError, Result};

const RELATIVE_TOLERANCE: f64 = 1e-10;

/// Lower-triangular `L` with `A = L * L^T` for a symmetric positive
/// semi-definite `A`. Pivots that vanish within tolerance produce a zero
/// column, so assets with no variance are accepted.
pub fn cholesky(matrix: &[Vec<f64>]) -> Result<Vec<Vec<f64>>> {
    let n = matrix.len();
    if let Some(row) = matrix.iter().position(|r| r.len() != n) {
        return Err(ForecastError::invalid_parameter(
            "covariance",
            format!("row {} has {} entries, expected {}", row, matrix[row].len(), n),
        ));
    }
    if matrix.iter().flatten().any(|v| !v.is_finite()) {
        return Err(ForecastError::NumericInstability(
            "covariance matrix has non-finite entries".to_string(),
        ));
    }

    let scale = (0..n).map(|i| matrix[i][i].abs()).fold(0.0, f64::max);
    let tolerance = RELATIVE_TOLERANCE * scale;

    let mut l = vec![vec![0.0; n]; n];
    for i in 0..n {
        for j in 0..=i {
            let sum: f64 = (0..j).map(|k| l[i][k] * l[j][k]).sum();
            if i == j {
                let pivot = matrix[i][i] - sum;
                if pivot < -tolerance {
                    return Err(ForecastError::invalid_parameter(
                        "covariance",
                        format!("matrix is not positive semi-definite (pivot {} at {})", pivot, i),
                    ));
                }
                l[i][i] = if pivot <= tolerance { 0.0 } else { pivot.sqrt() };
            } else if l[j][j] == 0.0 {
                l[i][j] = 0.0;
            } else {
                l[i][j] = (matrix[i][j] - sum) / l[j][j];
            }
        }
    }
    Ok(l)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reconstruct(l: &[Vec<f64>]) -> Vec<Vec<f64>> {
        let n = l.len();
        (0..n)
            .map(|i| (0..n).map(|j| (0..n).map(|k| l[i][k] * l[j][k]).sum::<f64>()).collect())
            .collect()
    }

    #[test]
    fn test_factorization() -> Result<()> {
        let a = vec![
            vec![4.0, 2.0, 0.4],
            vec![2.0, 2.0, 0.3],
            vec![0.4, 0.3, 1.0],
        ];
        let l = cholesky(&a)?;
        assert_eq!(l[0][1], 0.0);
        assert_eq!(l[0][0], 2.0);
        let back = reconstruct(&l);
        for i in 0..3 {
            for j in 0..3 {
                assert!((back[i][j] - a[i][j]).abs() < 1e-12);
            }
        }
        Ok(())
    }

    #[test]
    fn test_zero_variance_asset() -> Result<()> {
        let a = vec![vec![1e-4, 0.0], vec![0.0, 0.0]];
        let l = cholesky(&a)?;
        assert_eq!(l[1], vec![0.0, 0.0]);
        Ok(())
    }

    #[test]
    fn test_rejects_indefinite_and_ragged() {
        let a = vec![vec![1.0, 2.0], vec![2.0, 1.0]];
        assert!(matches!(
            cholesky(&a),
            Err(ForecastError::InvalidParameter { .. })
        ));
        let ragged = vec![vec![1.0, 0.0], vec![0.0]];
        assert!(cholesky(&ragged).is_err());
    }
}
