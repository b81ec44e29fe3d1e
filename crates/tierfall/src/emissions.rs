// Copyright (c) The Tierfall Project Authors.
// Licensed under the MIT License.

//! Blocking delivery of strategy executions.

use std::fmt;

use futures::future::BoxFuture;
use tierfall_provider::Error;

use crate::repository::Drive;

/// Iterator over the emissions of one strategy execution.
///
/// Returned by [`Repository::execute_blocking`][crate::Repository::execute_blocking].
/// Each `next` call blocks the current thread while the engine consults
/// providers; the iterator is fused once the execution completes.
pub struct Emissions<'a, P, R, Ret, Back> {
    drive: Drive<'a, P, R, Ret, Back>,
}

impl<'a, P, R, Ret, Back> Emissions<'a, P, R, Ret, Back> {
    pub(crate) fn new(drive: Drive<'a, P, R, Ret, Back>) -> Self {
        Self { drive }
    }
}

impl<P, R, Ret, Back> fmt::Debug for Emissions<'_, P, R, Ret, Back> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Emissions").finish_non_exhaustive()
    }
}

impl<'a, P, R, Ret, Back> Iterator for Emissions<'a, P, R, Ret, Back>
where
    R: Clone,
    Ret: FnMut(&'a P) -> BoxFuture<'a, Result<Option<R>, Error>>,
    Back: FnMut(&'a P, R) -> BoxFuture<'a, Result<(), Error>>,
{
    type Item = Result<R, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        futures::executor::block_on(self.drive.advance())
    }
}
