/// Creates a stream that emits the whole struct whenever any of the listed
/// `Property` fields changes.
///
/// # Example
/// ```ignore
/// impl MyHost {
///     pub fn watch(&self) -> impl Stream<Item = Self> + Send {
///         watch_all!(self, variables, health)
///     }
/// }
/// ```
#[macro_export]
macro_rules! watch_all {
    ($self:expr, $($source:ident),+ $(,)?) => {
        {
            use ::futures::StreamExt;

            let cloned = $self.clone();
            let streams: Vec<::futures::stream::BoxStream<'static, ()>> = vec![
                $($self.$source.watch().map(|_| ()).boxed(),)+
            ];
            ::futures::stream::select_all(streams).map(move |_| cloned.clone())
        }
    };
}
