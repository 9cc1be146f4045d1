//! 中断与主循环之间的边沿队列
//!
//! 单生产者单消费者: 外部中断写入, 主循环读出。

use heapless::spsc::{Consumer, Producer, Queue};

use crate::config::IR_EDGE_QUEUE_CAPACITY;

use super::edge::EdgeEvent;
use super::receiver::IrReceiver;

/// 边沿队列, 实际容量为 N - 1
pub type EdgeQueue<const N: usize = IR_EDGE_QUEUE_CAPACITY> = Queue<EdgeEvent, N>;

/// 中断侧
pub struct EdgeProducer<'a, const N: usize = IR_EDGE_QUEUE_CAPACITY> {
    producer: Producer<'a, EdgeEvent, N>,
    overruns: u32,
}

/// 主循环侧
pub struct EdgeConsumer<'a, const N: usize = IR_EDGE_QUEUE_CAPACITY> {
    consumer: Consumer<'a, EdgeEvent, N>,
}

/// 拆分队列
pub fn split<const N: usize>(
    queue: &mut EdgeQueue<N>,
) -> (EdgeProducer<'_, N>, EdgeConsumer<'_, N>) {
    let (producer, consumer) = queue.split();
    (
        EdgeProducer {
            producer,
            overruns: 0,
        },
        EdgeConsumer { consumer },
    )
}

impl<'a, const N: usize> EdgeProducer<'a, N> {
    /// 写入边沿
    /// 队列已满时丢弃并计数
    pub fn push(&mut self, event: EdgeEvent) -> bool {
        match self.producer.enqueue(event) {
            Ok(()) => true,
            Err(_) => {
                self.overruns = self.overruns.wrapping_add(1);
                false
            }
        }
    }

    /// 因队列已满被丢弃的边沿数
    pub fn overruns(&self) -> u32 {
        self.overruns
    }
}

impl<'a, const N: usize> EdgeConsumer<'a, N> {
    pub fn pop(&mut self) -> Option<EdgeEvent> {
        self.consumer.dequeue()
    }

    /// 将队列中所有边沿送入接收器
    /// 返回期间开始的新信号数
    pub fn drain_into(&mut self, receiver: &mut IrReceiver) -> usize {
        let mut started = 0;
        while let Some(event) = self.consumer.dequeue() {
            if receiver.on_edge(event) {
                started += 1;
            }
        }
        started
    }
}
