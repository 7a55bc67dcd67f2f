/// Evenly spaced samples over a closed interval, like numpy.linspace
#[derive(Clone, Debug)]
pub struct Linspace {
    start: f64,
    step: f64,
    index: usize,
    len: usize,
}

impl Linspace {
    pub fn new(min: f64, max: f64, n: usize) -> Self {
        let step = if n > 1 {
            let num_steps = (n - 1) as f64;
            (max - min) / num_steps
        } else {
            0.
        };
        Linspace { start: min, step, index: 0, len: n }
    }

    /// Samples `min`, `min + step`, ... up to and including `max` when it lands on the grid.
    ///
    /// Returns `None` when the number of samples does not fit in a `usize`.
    pub fn stepped(min: f64, max: f64, step: f64) -> Option<Self> {
        // floor drops a trailing partial step. The epsilon keeps e.g. 0.3 / 0.1 from
        // flooring to 2.
        let num_steps = ((max - min) / step + 1e-9).floor();

        if !(num_steps >= 0. && num_steps < usize::MAX as f64) {
            return None;
        }

        let num = (num_steps as usize).checked_add(1)?;

        Some(Linspace { start: min, step, index: 0, len: num })
    }
}

impl Iterator for Linspace {
    type Item = f64;

    #[inline]
    fn next(&mut self) -> Option<f64> {
        if self.index >= self.len {
            None
        } else {
            // Calculate the value just like numpy.linspace does
            let i = self.index;
            self.index += 1;
            Some(self.start + self.step * i as f64)
        }
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.len - self.index;
        (n, Some(n))
    }
}

impl ExactSizeIterator for Linspace {}

#[test]
fn test_linspace() {
    let values: Vec<_> = Linspace::new(0., 100., 101).collect();

    assert_eq!(values.len(), 101);
    assert_eq!(values[0], 0.);
    assert_eq!(values[37], 37.);
    assert_eq!(values[100], 100.);

    assert_eq!(Linspace::new(2., 2., 1).collect::<Vec<_>>(), vec![2.]);
    assert_eq!(Linspace::new(0., 1., 0).count(), 0);
}

#[test]
fn test_stepped() {
    let stepped = |min, max, step| Linspace::stepped(min, max, step).map(|l| l.collect::<Vec<_>>());
    let values = stepped(10., 40., 1.).unwrap();

    assert_eq!(values.len(), 31);
    assert_eq!(values.first(), Some(&10.));
    assert_eq!(values.last(), Some(&40.));

    assert_eq!(Linspace::stepped(0., 0.3, 0.1).map(|l| l.len()), Some(4));
    assert_eq!(stepped(0., 10., 4.), Some(vec![0., 4., 8.]));
    assert_eq!(stepped(5., 5., 1.), Some(vec![5.]));
}

#[test]
fn test_stepped_count_overflow() {
    assert!(Linspace::stepped(10., 40., 1e-300).is_none());
    assert!(Linspace::stepped(0., f64::MAX, 1.).is_none());
    assert!(Linspace::stepped(0., f64::NAN, 1.).is_none());
    assert!(Linspace::stepped(40., 10., 1.).is_none());
}
