//! LU decomposition with partial pivoting and implicit row scaling

const N: usize = 4;

/// Row-permuted LU factors of a 4x4 matrix
///
/// `lu` holds both factors in place: the strict lower triangle is L (with an
/// implied unit diagonal), the upper triangle including the diagonal is U.
/// `index[j]` records the row exchanged into position `j`.
#[derive(Clone, Debug)]
pub(crate) struct LuDecomposition {
    lu: [[f32; N]; N],
    index: [usize; N],
}

impl LuDecomposition {
    /// Factor `m`, or `None` if it is singular
    ///
    /// Singular means a row whose largest magnitude is exactly zero, or a
    /// pivot that is exactly zero after elimination.
    pub(crate) fn new(m: &[[f32; N]; N]) -> Option<Self> {
        let mut a = *m;
        let mut index = [0usize; N];

        // Implicit scaling: remember 1 / (largest element) of every row
        let mut scale = [0.0f32; N];
        for (row, s) in a.iter().zip(scale.iter_mut()) {
            let big = row.iter().fold(0.0f32, |acc, v| acc.max(v.abs()));
            if big == 0.0 {
                return None;
            }
            *s = 1.0 / big;
        }

        // Crout's method, column by column
        for j in 0..N {
            for i in 0..j {
                let mut sum = a[i][j];
                for k in 0..i {
                    sum -= a[i][k] * a[k][j];
                }
                a[i][j] = sum;
            }

            let mut big = 0.0f32;
            let mut pivot = j;
            for i in j..N {
                let mut sum = a[i][j];
                for k in 0..j {
                    sum -= a[i][k] * a[k][j];
                }
                a[i][j] = sum;

                let merit = scale[i] * sum.abs();
                if merit >= big {
                    big = merit;
                    pivot = i;
                }
            }

            if pivot != j {
                a.swap(pivot, j);
                scale[pivot] = scale[j];
            }
            index[j] = pivot;

            if a[j][j] == 0.0 {
                return None;
            }

            let inv_pivot = 1.0 / a[j][j];
            for row in a.iter_mut().skip(j + 1) {
                row[j] *= inv_pivot;
            }
        }

        Some(Self { lu: a, index })
    }

    /// Solve `A x = b` in place by forward and back substitution
    pub(crate) fn solve(&self, b: &mut [f32; N]) {
        let a = &self.lu;

        // Forward substitution, unscrambling the permutation as we go.
        // `first` is the first non-zero entry of b, skipping leading zeros.
        let mut first: Option<usize> = None;
        for i in 0..N {
            let ip = self.index[i];
            let mut sum = b[ip];
            b[ip] = b[i];
            if let Some(start) = first {
                for j in start..i {
                    sum -= a[i][j] * b[j];
                }
            } else if sum != 0.0 {
                first = Some(i);
            }
            b[i] = sum;
        }

        for i in (0..N).rev() {
            let mut sum = b[i];
            for j in i + 1..N {
                sum -= a[i][j] * b[j];
            }
            b[i] = sum / a[i][i];
        }
    }
}
