use super::{ExtensionArray, Host};
use numpy::ndarray::ArrayD;

/// an extension array or a plain n-dimensional array
#[derive(Debug, Clone)]
pub enum ArrayLike<H: Host, T = f64> {
    Extension(H::ExtensionArray),
    Ndarray(ArrayD<T>),
}

impl<H: Host, T> ArrayLike<H, T> {
    /// length of the first axis, `0` for a 0-d array
    pub fn len(&self) -> usize {
        match self {
            ArrayLike::Extension(array) => array.len(),
            ArrayLike::Ndarray(array) => array.shape().first().copied().unwrap_or(0),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// [`ArrayLike`], or one of the library's labelled one-dimensional containers
#[derive(Debug, Clone)]
pub enum AnyArrayLike<H: Host, T = f64> {
    Array(ArrayLike<H, T>),
    Index(H::Index),
    Series(H::Series),
}

impl<H: Host, T> From<ArrayLike<H, T>> for AnyArrayLike<H, T> {
    fn from(array: ArrayLike<H, T>) -> Self {
        AnyArrayLike::Array(array)
    }
}

impl<H: Host, T> TryFrom<AnyArrayLike<H, T>> for ArrayLike<H, T> {
    type Error = AnyArrayLike<H, T>;

    fn try_from(array: AnyArrayLike<H, T>) -> Result<Self, AnyArrayLike<H, T>> {
        match array {
            AnyArrayLike::Array(array) => Ok(array),
            other => Err(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::df::{Index, NativeHost};
    use crate::typing::tests::{Categorical, TestHost};
    use numpy::ndarray::{arr0, Array2};

    #[test]
    fn test_array_like_len() {
        let matrix: ArrayLike<NativeHost> = ArrayLike::Ndarray(Array2::<f64>::zeros((3, 2)).into_dyn());
        assert_eq!(matrix.len(), 3);
        let scalar: ArrayLike<NativeHost> = ArrayLike::Ndarray(arr0(1.).into_dyn());
        assert!(scalar.is_empty());
        let categorical: ArrayLike<TestHost> =
            ArrayLike::Extension(Categorical(vec!["a".to_string(), "b".to_string()]));
        assert_eq!(categorical.len(), 2);
    }

    #[test]
    fn test_any_array_like() {
        let array: ArrayLike<NativeHost> = ArrayLike::Ndarray(arr0(1.).into_dyn());
        let any = AnyArrayLike::from(array);
        assert!(ArrayLike::try_from(any).is_ok());
        let index = AnyArrayLike::<NativeHost>::Index(Index::range(4));
        match ArrayLike::try_from(index) {
            Err(AnyArrayLike::Index(index)) => assert_eq!(index.len(), 4),
            other => panic!("unexpected conversion result: {other:?}"),
        }
    }
}
